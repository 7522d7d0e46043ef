use core::cell::Cell;

use prefab::rand::Rng;
use prefab::{Builder, Faker, Fixture, Template};

#[derive(Fixture, Default, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[prefab_testhelpers::test]
fn partial_template() {
    let origin = PointPartial::default().x(0).y(0);
    let point = Point::fixture_from(origin.clone()).build();
    assert_eq!(point, Point { x: 0, y: 0 });

    let point = Point::fixture_from(origin).x(5).build();
    assert_eq!(point, Point { x: 5, y: 0 });
}

#[prefab_testhelpers::test]
fn empty_template() {
    let point = prefab::builder_from::<Point>(Template::Empty).build();
    assert_eq!(point, Point::default());
}

#[prefab_testhelpers::test]
fn generator_template_runs_once_at_creation() {
    let calls = Cell::new(0);
    let builder = prefab::builder_with::<Point>(|_| {
        calls.set(calls.get() + 1);
        PointPartial::default().x(10).y(20)
    });
    assert_eq!(calls.get(), 1);

    let builder = builder.y(21);
    let first = builder.build();
    let second = builder.build();
    assert_eq!(calls.get(), 1);
    assert_eq!(first, Point { x: 10, y: 21 });
    assert_eq!(first, second);
}

#[prefab_testhelpers::test]
fn generator_template_gets_the_builders_faker() {
    let template = Template::generate(|faker: &mut Faker| {
        PointPartial::default().x(faker.gen_range(0..100))
    });
    let builder: PointBuilder = Builder::<Point>::from_template(template, Faker::seeded(3)).into();

    let mut expected = Faker::seeded(3);
    let x: i32 = expected.gen_range(0..100);
    assert_eq!(builder.build().x, x);
}

#[prefab_testhelpers::test]
fn template_runs_before_setters() {
    let point = prefab::builder_with::<Point>(|_| PointPartial::default().x(1).y(1))
        .x(2)
        .build();
    assert_eq!(point, Point { x: 2, y: 1 });
}
