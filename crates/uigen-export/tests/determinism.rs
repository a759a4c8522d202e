//! Export determinism tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uigen_export::{export, ExportOptions, FileLayout, Packaging};
use uigen_spec::{props, Arrangement, ComponentNode, ExportFormat, LayoutHints, PropValue, Specification};

fn landing() -> Specification {
    Specification::new()
        .with_name("Landing")
        .with_layout(LayoutHints {
            arrangement: Arrangement::Stack,
            spacing: Some("md".into()),
            max_width: Some(1200),
        })
        .with_component(
            ComponentNode::new("PricingTable")
                .unwrap()
                .with_prop("title", "Choose your plan")
                .with_prop(
                    "tiers",
                    vec![
                        PropValue::from(props! { "name" => "Starter", "price" => 9 }),
                        PropValue::from(props! { "name" => "Pro", "price" => 29, "featured" => true }),
                    ],
                )
                .with_prop("showBillingToggle", true),
        )
        .with_component(
            ComponentNode::new("Button")
                .unwrap()
                .with_prop("label", "Get started")
                .with_prop("disabled", false),
        )
}

#[test]
fn repeated_export_is_byte_identical() {
    let spec = landing();
    let options = ExportOptions::default()
        .with_format(ExportFormat::All)
        .with_packaging(Packaging::Npm);

    let first = export(&spec, &options).unwrap();
    let second = export(&spec, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn clone_exports_identically() {
    let spec = landing();
    let copy = spec.clone();
    let options = ExportOptions::default().with_layout(FileLayout::PerComponent);
    assert_eq!(
        export(&spec, &options).unwrap().fingerprint,
        export(&copy, &options).unwrap().fingerprint
    );
}

#[test]
fn options_never_change_component_content() {
    let spec = landing();
    let single = export(&spec, &ExportOptions::default()).unwrap();
    let split = export(
        &spec,
        &ExportOptions::default().with_layout(FileLayout::PerComponent),
    )
    .unwrap();

    let app = &single.file("App.jsx").unwrap().content;
    let pricing = &split.file("components/PricingTable0.jsx").unwrap().content;
    for needle in ["title=\"Choose your plan\"", "showBillingToggle\n", "tiers={[{\"name\":\"Starter\",\"price\":9}"] {
        assert!(app.contains(needle), "single file missing {needle}");
        assert!(pricing.contains(needle), "component file missing {needle}");
    }
    assert!(app.contains("disabled={false}"));
}

#[test]
fn components_follow_specification_order() {
    let package = export(&landing(), &ExportOptions::default()).unwrap();
    let app = &package.file("App.jsx").unwrap().content;
    let pricing = app.find("<PricingTable").unwrap();
    let button = app.find("<Button").unwrap();
    assert!(pricing < button);
}

#[test]
fn stylesheet_uses_layout_hints() {
    let package = export(&landing(), &ExportOptions::default()).unwrap();
    let css = &package.file("styles.css").unwrap().content;
    assert!(css.contains("gap: 16px;"));
    assert!(css.contains("max-width: 1200px;"));
}

proptest! {
    #[test]
    fn prop_export_is_deterministic(
        title in "[A-Za-z ]{0,24}",
        count in 0i64..1000,
        flag in any::<bool>(),
    ) {
        let spec = Specification::new().with_component(
            ComponentNode::new("Card")
                .unwrap()
                .with_prop("title", title.as_str())
                .with_prop("count", count)
                .with_prop("elevated", flag),
        );
        let options = ExportOptions::default().with_format(ExportFormat::All);
        let a = export(&spec, &options).unwrap();
        let b = export(&spec, &options).unwrap();
        prop_assert_eq!(a.fingerprint, b.fingerprint);
        prop_assert_eq!(a.files, b.files);
    }
}
