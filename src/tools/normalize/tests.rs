use crate::tools::normalize::*;
use crate::types::RawPage;

fn page() -> RawPage {
    RawPage {
        url: "https://example.com/r/1".into(),
        html: String::new(),
        final_url: "https://example.com/recipes/soup".into(),
        content_type: "text/html".into(),
    }
}

#[test]
fn build_requires_a_title() {
    let draft = RecipeDraft {
        title: Some("  <b> </b> ".into()),
        ingredients: vec!["1 egg".into()],
        ..Default::default()
    };
    assert!(draft.build(&page()).is_none());
}

#[test]
fn build_cleans_texts_and_orders_steps() {
    let draft = RecipeDraft {
        title: Some("Tomato &amp; Basil Soup".into()),
        ingredients: vec!["2 tomatoes".into(), "   ".into(), "<b>1</b> onion".into()],
        steps: vec!["".into(), "Chop.".into(), "Simmer\n 20 min.".into()],
        ..Default::default()
    };
    let recipe = draft.build(&page()).expect("titled draft builds");

    assert_eq!(recipe.title, "Tomato & Basil Soup");
    let ingredients: Vec<_> = recipe.ingredients.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(ingredients, ["2 tomatoes", "1 onion"]);
    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[0].order, 0);
    assert_eq!(recipe.steps[1].order, 1);
    assert_eq!(recipe.steps[1].text, "Simmer 20 min.");
    assert_eq!(recipe.source_url, "https://example.com/recipes/soup");
}

#[test]
fn total_time_fills_cook_time_when_alone() {
    let draft = RecipeDraft {
        title: Some("Stew".into()),
        total_time_minutes: Some(90),
        ..Default::default()
    };
    let recipe = draft.build(&page()).unwrap();
    assert_eq!(recipe.cook_time_minutes, Some(90));
    assert_eq!(recipe.total_time_minutes, Some(90));

    let draft = RecipeDraft {
        title: Some("Stew".into()),
        prep_time_minutes: Some(10),
        total_time_minutes: Some(90),
        ..Default::default()
    };
    assert_eq!(draft.build(&page()).unwrap().cook_time_minutes, None);
}

#[test]
fn relative_images_resolve_against_final_url() {
    assert_eq!(
        resolve_url("/img/soup.jpg", "https://example.com/recipes/soup").as_deref(),
        Some("https://example.com/img/soup.jpg")
    );
    assert_eq!(
        resolve_url("//cdn.example.com/a.png", "https://example.com/x").as_deref(),
        Some("https://cdn.example.com/a.png")
    );
    assert_eq!(resolve_url("data:image/png;base64,AAAA", "https://example.com/"), None);
    assert_eq!(resolve_url("javascript:void(0)", "https://example.com/"), None);
    assert_eq!(resolve_url("", "https://example.com/"), None);
}
