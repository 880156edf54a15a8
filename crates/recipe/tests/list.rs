use foodgram_recipe::RecipeFilter;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn filter_by_author_and_tags() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let alice = helpers::create_user(&pool, "alice").await?;
    let bob = helpers::create_user(&pool, "bob").await?;
    let breakfast = helpers::create_tag(&pool, "Breakfast", "breakfast").await?;
    let dinner = helpers::create_tag(&pool, "Dinner", "dinner").await?;
    let eggs = helpers::create_ingredient(&pool, "eggs", "pcs").await?;

    helpers::create_recipe(&pool, alice.id, "Omelette", vec![breakfast], vec![(eggs, 3)]).await?;
    helpers::create_recipe(&pool, alice.id, "Frittata", vec![dinner], vec![(eggs, 5)]).await?;
    helpers::create_recipe(&pool, bob.id, "Shakshuka", vec![breakfast], vec![(eggs, 4)]).await?;

    let by_alice = RecipeFilter {
        author: Some(alice.id),
        ..Default::default()
    };
    assert_eq!(foodgram_recipe::count_recipes(&pool, &by_alice).await?, 2);

    let breakfast_only = RecipeFilter {
        tags: vec!["breakfast".to_owned()],
        ..Default::default()
    };
    let recipes = foodgram_recipe::list_recipes(&pool, &breakfast_only, 10, 0).await?;
    assert_eq!(recipes.len(), 2);

    let both_tags = RecipeFilter {
        tags: vec!["breakfast".to_owned(), "dinner".to_owned()],
        ..Default::default()
    };
    assert_eq!(foodgram_recipe::count_recipes(&pool, &both_tags).await?, 3);

    Ok(())
}

#[tokio::test]
async fn filter_by_favorites() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let alice = helpers::create_user(&pool, "alice").await?;
    let bob = helpers::create_user(&pool, "bob").await?;
    let breakfast = helpers::create_tag(&pool, "Breakfast", "breakfast").await?;
    let eggs = helpers::create_ingredient(&pool, "eggs", "pcs").await?;

    let omelette =
        helpers::create_recipe(&pool, alice.id, "Omelette", vec![breakfast], vec![(eggs, 3)])
            .await?;
    helpers::create_recipe(&pool, alice.id, "Frittata", vec![breakfast], vec![(eggs, 5)]).await?;

    foodgram_recipe::favourite::add_favorite(&pool, bob.id, omelette.id).await?;

    let favorites = RecipeFilter {
        favorited_by: Some(bob.id),
        ..Default::default()
    };
    let recipes = foodgram_recipe::list_recipes(&pool, &favorites, 10, 0).await?;
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, omelette.id);

    Ok(())
}

#[tokio::test]
async fn newest_recipes_come_first() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let alice = helpers::create_user(&pool, "alice").await?;
    let breakfast = helpers::create_tag(&pool, "Breakfast", "breakfast").await?;
    let eggs = helpers::create_ingredient(&pool, "eggs", "pcs").await?;

    helpers::create_recipe(&pool, alice.id, "First", vec![breakfast], vec![(eggs, 1)]).await?;
    helpers::create_recipe(&pool, alice.id, "Second", vec![breakfast], vec![(eggs, 2)]).await?;
    helpers::create_recipe(&pool, alice.id, "Third", vec![breakfast], vec![(eggs, 3)]).await?;

    let recipes =
        foodgram_recipe::list_recipes(&pool, &RecipeFilter::default(), 2, 0).await?;
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].name, "Third");
    assert_eq!(recipes[1].name, "Second");

    let second_page =
        foodgram_recipe::list_recipes(&pool, &RecipeFilter::default(), 2, 2).await?;
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].name, "First");

    Ok(())
}

#[tokio::test]
async fn author_previews_honor_limit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let alice = helpers::create_user(&pool, "alice").await?;
    let breakfast = helpers::create_tag(&pool, "Breakfast", "breakfast").await?;
    let eggs = helpers::create_ingredient(&pool, "eggs", "pcs").await?;

    helpers::create_recipe(&pool, alice.id, "First", vec![breakfast], vec![(eggs, 1)]).await?;
    helpers::create_recipe(&pool, alice.id, "Second", vec![breakfast], vec![(eggs, 2)]).await?;
    helpers::create_recipe(&pool, alice.id, "Third", vec![breakfast], vec![(eggs, 3)]).await?;

    let truncated = foodgram_recipe::previews_by_author(&pool, alice.id, Some(2)).await?;
    assert_eq!(truncated.len(), 2);
    assert_eq!(truncated[0].name, "Third");

    let all = foodgram_recipe::previews_by_author(&pool, alice.id, None).await?;
    assert_eq!(all.len(), 3);

    let none = foodgram_recipe::previews_by_author(&pool, alice.id, Some(-1)).await?;
    assert!(none.is_empty());

    Ok(())
}

#[tokio::test]
async fn ingredient_search_matches_prefix() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    helpers::create_ingredient(&pool, "salt", "g").await?;
    helpers::create_ingredient(&pool, "salmon", "g").await?;
    helpers::create_ingredient(&pool, "pepper", "g").await?;

    let matches = foodgram_recipe::list_ingredients(&pool, Some("sal")).await?;
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].name, "salmon");
    assert_eq!(matches[1].name, "salt");

    let all = foodgram_recipe::list_ingredients(&pool, None).await?;
    assert_eq!(all.len(), 3);

    Ok(())
}

#[tokio::test]
async fn ingredient_search_treats_wildcards_literally() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    helpers::create_ingredient(&pool, "eggs", "pcs").await?;
    helpers::create_ingredient(&pool, "100% cocoa", "g").await?;
    helpers::create_ingredient(&pool, "sun_dried tomato", "g").await?;

    let percent = foodgram_recipe::list_ingredients(&pool, Some("%")).await?;
    assert!(percent.is_empty());

    let underscore = foodgram_recipe::list_ingredients(&pool, Some("_")).await?;
    assert!(underscore.is_empty());

    let cocoa = foodgram_recipe::list_ingredients(&pool, Some("100%")).await?;
    assert_eq!(cocoa.len(), 1);
    assert_eq!(cocoa[0].name, "100% cocoa");

    let tomato = foodgram_recipe::list_ingredients(&pool, Some("sun_")).await?;
    assert_eq!(tomato.len(), 1);
    assert_eq!(tomato[0].name, "sun_dried tomato");

    Ok(())
}
