use scraper::Html;

use crate::tools::microdata::utils::item_props;
use crate::tools::microdata::*;
use crate::types::RawPage;

fn page(body: &str) -> RawPage {
    RawPage::from_html(
        "https://example.com/recipes/cake",
        format!("<html><head><title>t</title></head><body>{body}</body></html>"),
    )
}

const CAKE: &str = r#"
<div itemscope itemtype="https://schema.org/Recipe">
  <h1 itemprop="name">Lemon Cake</h1>
  <div itemprop="author" itemscope itemtype="https://schema.org/Person">
    <span itemprop="name">Ann Baker</span>
  </div>
  <p itemprop="description">Bright and <em>zesty</em>.</p>
  <meta itemprop="prepTime" content="PT20M">
  <time itemprop="cookTime" datetime="PT45M">45 minutes</time>
  <span itemprop="recipeYield">8 slices</span>
  <img itemprop="image" src="/img/cake.jpg">
  <ul>
    <li itemprop="recipeIngredient">2 cups flour</li>
    <li itemprop="recipeIngredient">1 lemon</li>
  </ul>
  <ol>
    <li itemprop="recipeInstructions" itemscope itemtype="https://schema.org/HowToStep">
      <span itemprop="text">Zest the lemon.</span>
    </li>
    <li itemprop="recipeInstructions" itemscope itemtype="https://schema.org/HowToStep">
      <span itemprop="text">Bake.</span>
    </li>
  </ol>
</div>"#;

#[test]
fn full_microdata_recipe_maps_every_field() {
    let recipe = try_microdata(&page(CAKE)).expect("recipe found");

    assert_eq!(recipe.title, "Lemon Cake");
    assert_eq!(recipe.description, "Bright and zesty.");
    assert_eq!(recipe.prep_time_minutes, Some(20));
    assert_eq!(recipe.cook_time_minutes, Some(45));
    assert_eq!(recipe.servings, Some(8));
    assert_eq!(
        recipe.image_url.as_deref(),
        Some("https://example.com/img/cake.jpg")
    );
    assert_eq!(recipe.ingredients.len(), 2);
    let steps: Vec<_> = recipe.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(steps, ["Zest the lemon.", "Bake."]);
}

#[test]
fn nested_scopes_do_not_leak_properties() {
    let doc = Html::parse_document(CAKE);
    let root = utils::recipe_roots(&doc)[0];
    let props = item_props(root);
    let names: Vec<_> = props.all("name").map(|el| el.value().name().to_string()).collect();
    assert_eq!(names, ["h1"]);
}

#[test]
fn single_container_splits_into_list_items() {
    let html = r#"<div itemscope itemtype="http://schema.org/Recipe">
        <span itemprop="name">Tea</span>
        <div itemprop="recipeInstructions"><ol><li>Boil water.</li><li>Steep.</li></ol></div>
    </div>"#;
    let recipe = try_microdata(&page(html)).unwrap();
    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[1].text, "Steep.");
}

#[test]
fn single_container_with_breaks_splits_into_lines() {
    let html = r#"<div itemscope itemtype="http://schema.org/Recipe">
        <span itemprop="name">Toast</span>
        <div itemprop="recipeInstructions">Slice bread.<br>Toast it.<br>Butter.</div>
    </div>"#;
    let recipe = try_microdata(&page(html)).unwrap();
    let steps: Vec<_> = recipe.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(steps, ["Slice bread.", "Toast it.", "Butter."]);
}

#[test]
fn legacy_ingredients_property_and_rdfa_root() {
    let html = r#"<article vocab="http://schema.org/" typeof="Recipe">
        <h2 property="name">Old Soup</h2>
        <span property="ingredients">1 leek</span>
        <span property="ingredients">2 potatoes</span>
    </article>"#;
    let recipe = try_microdata(&page(html)).unwrap();
    assert_eq!(recipe.title, "Old Soup");
    assert_eq!(recipe.ingredients[1].text, "2 potatoes");
}

#[test]
fn visible_text_durations_are_read() {
    let html = r#"<div itemscope itemtype="http://schema.org/Recipe">
        <span itemprop="name">Roast</span>
        <span itemprop="totalTime">1 hour 10 mins</span>
        <span itemprop="prepTime" content="15 minutes">15 minutes</span>
        <span itemprop="recipeIngredient">1 chicken</span>
    </div>"#;
    let recipe = try_microdata(&page(html)).unwrap();
    assert_eq!(recipe.total_time_minutes, Some(70));
    assert_eq!(recipe.prep_time_minutes, None);
}

#[test]
fn title_only_or_untyped_pages_are_rejected() {
    let thin = r#"<div itemscope itemtype="http://schema.org/Recipe"><span itemprop="name">Nothing</span></div>"#;
    assert!(try_microdata(&page(thin)).is_none());

    let other = r#"<div itemscope itemtype="http://schema.org/RecipeCollection"><span itemprop="name">X</span>
        <span itemprop="recipeIngredient">y</span></div>"#;
    assert!(try_microdata(&page(other)).is_none());
}

#[test]
fn og_image_backs_up_missing_image() {
    let html = r#"<html><head><meta property="og:image" content="https://cdn.example.com/og.jpg"></head>
        <body><div itemscope itemtype="http://schema.org/Recipe"><span itemprop="name">Dip</span>
        <span itemprop="recipeIngredient">1 avocado</span></div></body></html>"#;
    let recipe = try_microdata(&RawPage::from_html("https://example.com/dip", html)).unwrap();
    assert_eq!(recipe.image_url.as_deref(), Some("https://cdn.example.com/og.jpg"));
}

#[test]
fn linked_text_properties_keep_their_text() {
    let html = r#"<div itemscope itemtype="http://schema.org/Recipe">
        <a itemprop="name" href="/recipes/chili">Weeknight Chili</a>
        <a itemprop="recipeIngredient" href="/shop/beans">1 can beans</a>
        <a itemprop="recipeIngredient" href="/shop/onion"></a>
    </div>"#;
    let recipe = try_microdata(&page(html)).unwrap();
    assert_eq!(recipe.title, "Weeknight Chili");
    assert_eq!(recipe.ingredients[0].text, "1 can beans");
    assert_eq!(recipe.ingredients[1].text, "/shop/onion");
}
