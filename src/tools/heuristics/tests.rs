use scraper::Html;

use crate::tools::heuristics::utils::{largest_image, text_facts, TextFacts};
use crate::tools::heuristics::*;
use crate::types::RawPage;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn page(html: &str) -> RawPage {
    RawPage::from_html("https://blog.example.com/posts/stew", html)
}

#[test]
fn ingredient_lines_outscore_navigation() {
    let ingredients = strings(&["2 cups flour", "1 tsp baking soda", "½ cup sugar", "3 eggs", "a pinch of salt"]);
    let nav = strings(&["Home", "Recipes", "About", "Contact", "Shop"]);
    let prose = strings(&[
        "This is a very long paragraph that rambles on about the history of the dish and how grandma used to make it every single Sunday without fail, rain or shine.",
        "Another equally long paragraph that talks about the weather, the garden, the neighbours and all the reasons you will absolutely love this particular recipe.",
    ]);

    assert!(score_list(&ingredients) >= INGREDIENT_THRESHOLD);
    assert!(score_list(&nav) < INGREDIENT_THRESHOLD);
    assert!(score_list(&prose) < INGREDIENT_THRESHOLD);
}

#[test]
fn article_led_headlines_are_not_ingredients() {
    let headlines = strings(&[
        "A guide to pasta shapes",
        "An easy weeknight dinner",
        "Some tips for baking",
        "A trip to Italy",
    ]);
    assert!(score_list(&headlines) < INGREDIENT_THRESHOLD);
    assert!(score_steps(&headlines) < STEP_THRESHOLD);

    let measured = strings(&["a pinch of salt", "a handful of basil", "some olive oil", "an onion"]);
    assert!(score_list(&measured) > score_list(&headlines));
}

#[test]
fn list_size_sweet_spot() {
    assert_eq!(score_list(&[]), 0.0);
    assert_eq!(score_list(&strings(&["1 egg"])), 0.0);

    let pair = score_list(&strings(&["1 egg", "2 eggs"]));
    let trio = score_list(&strings(&["1 egg", "2 eggs", "3 eggs"]));
    assert!(trio > pair);

    let huge: Vec<String> = (0..60).map(|i| format!("{i} eggs")).collect();
    let normal: Vec<String> = (0..10).map(|i| format!("{i} eggs")).collect();
    assert!(score_list(&normal) > score_list(&huge));
}

#[test]
fn steps_score_favors_sentences() {
    let steps = strings(&[
        "Preheat the oven and line a tray with baking paper.",
        "Whisk the butter with the sugar until pale and fluffy.",
        "Bake until golden, then cool on a rack before serving.",
    ]);
    let ingredients = strings(&["2 cups flour", "1 tsp salt", "3 eggs"]);
    assert!(score_steps(&steps) >= STEP_THRESHOLD);
    assert!(score_steps(&ingredients) < STEP_THRESHOLD);
    assert_eq!(score_steps(&[]), 0.0);
}

#[test]
fn numbered_list_under_h1_is_enough() {
    let html = r#"<html><body><h1>Pancakes</h1><ul>
        <li>1 cup flour</li><li>2 eggs</li><li>1 cup milk</li><li>2 tbsp sugar</li>
        <li>1 tsp baking powder</li><li>1 pinch salt</li><li>2 tbsp butter</li><li>1 tsp vanilla</li>
    </ul></body></html>"#;
    let recipe = try_heuristics(&page(html)).expect("tier 4 accepts");
    assert_eq!(recipe.title, "Pancakes");
    assert_eq!(recipe.ingredients.len(), 8);
    assert!(recipe.steps.is_empty());
}

#[test]
fn heading_without_content_fails() {
    let html = "<html><body><h1>About Us</h1><p>We love food.</p></body></html>";
    assert!(try_heuristics(&page(html)).is_none());
}

#[test]
fn headings_drive_ingredients_and_steps() {
    let html = r#"<html><body>
        <nav><ul><li><a href="/">Home</a></li><li><a href="/r">Recipes</a></li></ul></nav>
        <h1>Grandma's Stew</h1>
        <h2>Ingredients</h2>
        <ul><li>Beef</li><li>Carrots</li><li>Potatoes</li><li>Salt</li></ul>
        <h2>Directions</h2>
        <ol>
          <li>Brown the beef in a large pot.</li>
          <li>Add vegetables and cover with water.</li>
          <li>Simmer for two hours.</li>
        </ol>
        <h2>Comments</h2>
        <p>Lovely!</p>
    </body></html>"#;
    let recipe = try_heuristics(&page(html)).unwrap();

    let ingredients: Vec<_> = recipe.ingredients.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(ingredients, ["Beef", "Carrots", "Potatoes", "Salt"]);
    let steps: Vec<_> = recipe.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        steps,
        ["Brown the beef in a large pot.", "Add vegetables and cover with water.", "Simmer for two hours."]
    );
}

#[test]
fn paragraphs_under_method_heading_become_steps() {
    let html = r#"<h1>Flatbread</h1>
        <div class="recipe-ingredients"><ul><li>Flour</li><li>Water</li><li>Yeast</li></ul></div>
        <h3>Method</h3>
        <p>Mix everything into a dough.</p>
        <p>Roll thin and grill.</p>"#;
    let recipe = try_heuristics(&page(html)).unwrap();
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[1].text, "Roll thin and grill.");
}

#[test]
fn step_like_list_is_used_without_a_heading() {
    let html = r#"<h1>Shortbread</h1>
        <ul><li>250 g butter</li><li>125 g sugar</li><li>375 g flour</li></ul>
        <ol>
          <li>Preheat the oven and line a tray with baking paper.</li>
          <li>Whisk the butter with the sugar until pale and fluffy.</li>
          <li>Bake until golden, then cool on a rack before serving.</li>
        </ol>"#;
    let recipe = try_heuristics(&page(html)).unwrap();
    assert_eq!(recipe.ingredients[0].text, "250 g butter");
    assert_eq!(recipe.steps.len(), 3);
    assert_eq!(recipe.steps[0].order, 0);
}

#[test]
fn title_falls_back_to_document_title() {
    let html = "<html><head><title>Lentil Soup</title></head><body>\
        <ul><li>1 cup lentils</li><li>2 carrots</li><li>1 onion</li></ul></body></html>";
    assert_eq!(try_heuristics(&page(html)).unwrap().title, "Lentil Soup");
}

#[test]
fn times_and_yield_come_from_visible_text() {
    let facts = text_facts("Prep Time: 15 minutes Cook time: 1 hr 5 mins Total: 80 mins Yield: 6 servings");
    assert_eq!(
        facts,
        TextFacts {
            prep: Some(15),
            cook: Some(65),
            total: Some(80),
            servings: Some(6),
        }
    );
    assert_eq!(text_facts("Serves 4 hungry people").servings, Some(4));
    assert_eq!(text_facts("cook for a while").cook, None);
}

#[test]
fn largest_declared_image_wins() {
    let doc = Html::parse_document(
        r#"<img src="icon.png" width="16" height="16">
           <img src="data:image/gif;base64,R0lGOD" width="2000" height="2000">
           <img src="/hero.jpg" width="800" height="600">
           <img src="/side.jpg" width="300" height="200">"#,
    );
    assert_eq!(largest_image(&doc, 40).as_deref(), Some("/hero.jpg"));

    let undeclared = Html::parse_document(r#"<img src="/a.jpg"><img src="/b.jpg">"#);
    assert_eq!(largest_image(&undeclared, 40).as_deref(), Some("/a.jpg"));
}
