use alchemist::{
    catalog,
    config::CellarConfig,
    error::{CellarError, EditError, TransformError},
    persist::{RecipeStore, memory::MemoryRecipeStore},
    recipe::TransformStep,
    service::Cellar,
    types::{Direction, RecipeName, TransformId},
};

fn cellar() -> Cellar<MemoryRecipeStore> {
    Cellar::new(MemoryRecipeStore::new(), CellarConfig::default())
}

fn name(raw: &str) -> RecipeName {
    RecipeName::new(raw).expect("valid name")
}

#[test]
fn base64_there_and_back() {
    let mut cellar = cellar();
    let mut recipe = cellar.get_or_create(&name("elixir")).expect("load");
    cellar
        .set_base_value(&mut recipe, Some("flag{x}".to_string()))
        .expect("base");
    cellar
        .append_step(&mut recipe, TransformStep::forward(TransformId::Base64))
        .expect("append");
    assert_eq!(cellar.evaluate(&mut recipe).output.as_deref(), Some("ZmxhZ3t4fQ=="));

    cellar
        .append_step(&mut recipe, TransformStep::inverse(TransformId::Base64))
        .expect("append");
    let evaluation = cellar.evaluate(&mut recipe);
    assert_eq!(evaluation.output.as_deref(), Some("flag{x}"));
    assert!(evaluation.is_complete());
}

#[test]
fn refusing_step_is_reported_with_partial_output() {
    let mut cellar = cellar();
    let mut recipe = cellar.get_or_create(&name("bad-hex")).expect("load");
    cellar
        .set_base_value(&mut recipe, Some("not-hex!".to_string()))
        .expect("base");
    cellar
        .append_step(&mut recipe, TransformStep::inverse(TransformId::Hex))
        .expect("append");
    cellar
        .append_step(&mut recipe, TransformStep::forward(TransformId::Base64))
        .expect("append");

    let evaluation = cellar.evaluate(&mut recipe);
    assert_eq!(evaluation.failed_step(), Some(1));
    assert_eq!(evaluation.output.as_deref(), Some("not-hex!"));
    let failure = evaluation.failure.expect("failure");
    assert_eq!(failure.transform, TransformId::Hex);
    assert_eq!(failure.direction, Direction::Inverse);
    assert!(matches!(failure.source, TransformError::Hex(_)));

    // The pipeline itself is never altered by evaluation.
    assert_eq!(recipe.steps.len(), 2);
}

#[test]
fn absent_base_yields_no_output() {
    let mut cellar = cellar();
    let mut recipe = cellar.get_or_create(&name("empty")).expect("load");
    cellar
        .append_step(&mut recipe, TransformStep::inverse(TransformId::Url))
        .expect("append");
    cellar.set_base_value(&mut recipe, Some(String::new())).expect("base");
    assert_eq!(recipe.base_value, None);

    let evaluation = cellar.evaluate(&mut recipe);
    assert_eq!(evaluation.output, None);
    assert_eq!(evaluation.failed_step(), None);
}

#[test]
fn out_of_range_delete_changes_nothing() {
    let mut cellar = cellar();
    let potion = name("potion");
    let mut recipe = cellar.get_or_create(&potion).expect("load");
    for id in [TransformId::Base64, TransformId::Hex, TransformId::Url] {
        cellar
            .append_step(&mut recipe, TransformStep::forward(id))
            .expect("append");
    }
    let before = recipe.clone();

    let err = cellar.delete_step(&mut recipe, 5).expect_err("out of range");
    assert!(matches!(
        err,
        CellarError::Edit(EditError::OutOfRange { position: 5, len: 3 })
    ));
    assert_eq!(recipe, before);
    assert!(cellar.find(&potion).expect("find").expect("stored").same_contents(&before));

    let err = cellar.move_step(&mut recipe, 0, 1).expect_err("zero position");
    assert!(matches!(err, CellarError::Edit(EditError::OutOfRange { .. })));
    assert_eq!(recipe, before);
}

#[test]
fn every_edit_is_durable_before_it_returns() {
    let mut cellar = cellar();
    let potion = name("potion");
    let mut recipe = cellar.get_or_create(&potion).expect("load");
    assert!(cellar.store().is_empty());

    cellar
        .set_base_value(&mut recipe, Some("a b".to_string()))
        .expect("base");
    cellar
        .append_step(&mut recipe, catalog::resolve("url", "encode").expect("resolve"))
        .expect("append");
    cellar
        .append_step(&mut recipe, catalog::resolve("unicode", "encode").expect("resolve"))
        .expect("append");
    cellar.move_step(&mut recipe, 1, 2).expect("move");

    let stored = cellar.find(&potion).expect("find").expect("stored");
    assert!(stored.same_contents(&recipe));
    assert_eq!(
        stored.steps,
        vec![
            TransformStep::forward(TransformId::Unicode),
            TransformStep::forward(TransformId::Url),
        ]
    );

    cellar.delete_step(&mut recipe, 1).expect("delete");
    let stored = cellar.find(&potion).expect("find").expect("stored");
    assert_eq!(stored.steps, vec![TransformStep::forward(TransformId::Url)]);
    assert_eq!(cellar.evaluate(&mut recipe).output.as_deref(), Some("a+b"));
}

#[test]
fn get_or_create_does_not_persist() {
    let cellar = cellar();
    let recipe = cellar.get_or_create(&name("ghost")).expect("load");
    assert!(recipe.steps.is_empty());
    assert_eq!(recipe.base_value, None);
    assert!(cellar.store().read(&name("ghost")).expect("read").is_none());
    assert!(cellar.names().expect("names").is_empty());
}

#[test]
fn generated_names_respect_configured_bounds() {
    let cellar = cellar();
    let mut names = cellar.name_generator(Some(7));
    let generated = cellar.create(None, &mut names).expect("generated");
    let len = generated.as_str().chars().count();
    assert!((20..=40).contains(&len));
    assert!(generated.as_str().chars().all(|c| c.is_ascii_alphabetic()));

    let mut again = cellar.name_generator(Some(7));
    assert_eq!(cellar.create(Some(""), &mut again).expect("generated"), generated);

    assert_eq!(
        cellar.create(Some("chosen"), &mut names).expect("requested"),
        name("chosen")
    );
    assert!(matches!(
        cellar.create(Some("x".repeat(41).as_str()), &mut names),
        Err(CellarError::Name(_))
    ));
}
