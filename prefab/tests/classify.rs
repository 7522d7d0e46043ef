use prefab::{Fixture, Record, Target, classify};

#[derive(Fixture, Default)]
struct Widget {
    size: u8,
}

#[prefab_testhelpers::test]
fn fixtures_are_classes() {
    let target = classify::<Widget>();
    assert!(target.is_class());
    assert_eq!(target, Target::Class(core::any::type_name::<Widget>()));
    assert!(target.to_string().starts_with("class "));
    assert_eq!(Widget::fixture().size(2).build().size, 2);
}

#[prefab_testhelpers::test]
fn records_are_plain() {
    let target = classify::<Record>();
    assert_eq!(target, Target::Plain);
    assert!(!target.is_class());
    assert_eq!(target.to_string(), "plain record");
}

#[prefab_testhelpers::test]
fn builders_report_their_target() {
    assert_eq!(Widget::fixture().target(), classify::<Widget>());
    assert_eq!(prefab::record().target(), classify::<Record>());
}
