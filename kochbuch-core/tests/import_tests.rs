//! End-to-end tests for the import pipeline, driven through MockClient.

use kochbuch_core::{import_from_url, ImportError, MockClient, FALLBACK_TITLE};

const SOUP_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<script type="application/ld+json">
{
    "@type": "Recipe",
    "name": "Tomato Soup",
    "image": "https://example.com/soup.jpg",
    "recipeIngredient": ["500 g Tomaten", "1 Zwiebel", "1 EL Olivenöl"],
    "recipeInstructions": ["Gemüse anbraten.", "Pürieren."],
    "prepTime": "PT10M",
    "cookTime": "PT20M",
    "recipeYield": "4"
}
</script>
</head>
<body></body>
</html>"#;

#[tokio::test]
async fn test_import_from_structured_data_only() {
    let client = MockClient::new()
        .with_html("https://example.com/tomato-soup", SOUP_PAGE)
        .with_image("https://example.com/soup.jpg", vec![3u8; 4096], "image/jpeg");

    let recipe = import_from_url(&client, "https://example.com/tomato-soup")
        .await
        .unwrap();

    assert_eq!(recipe.title, "Tomato Soup");
    assert_eq!(recipe.prep_time, 10);
    assert_eq!(recipe.cook_time, 20);
    // not declared on the page, derived from prep + cook
    assert_eq!(recipe.total_time, 30);
    assert_eq!(recipe.rest_time, 0);
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].amount, "500 g");
    assert_eq!(recipe.ingredients[0].name, "Tomaten");
    assert_eq!(recipe.instructions, "1. Gemüse anbraten.\n\n2. Pürieren.");
    assert_eq!(recipe.images.len(), 1);
    assert!(recipe.images[0].starts_with("data:image/jpeg;base64,"));
    assert_eq!(recipe.source_url, "https://example.com/tomato-soup");
    assert_eq!(recipe.calories_per_unit, 0);
    assert_eq!(recipe.weight_unit, "100g");
    assert!(recipe.categories.is_empty());
}

#[tokio::test]
async fn test_page_without_recipe_fails() {
    let client = MockClient::new().with_html(
        "https://example.com/blog",
        "<html><body><h1>Nur ein Blogeintrag</h1></body></html>",
    );

    let err = import_from_url(&client, "https://example.com/blog")
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::NoRecipeFound));
}

#[tokio::test]
async fn test_empty_title_falls_back_to_placeholder() {
    let page = r#"<html><head><script type="application/ld+json">
    {
        "@type": "Recipe",
        "name": "",
        "recipeIngredient": ["a", "b", "c", "d", "e", "f"],
        "recipeInstructions": "Kochen."
    }
    </script></head><body></body></html>"#;
    let client = MockClient::new().with_html("https://example.com/untitled", page);

    let recipe = import_from_url(&client, "https://example.com/untitled")
        .await
        .unwrap();
    assert_eq!(recipe.title, FALLBACK_TITLE);
    assert_eq!(recipe.ingredients.len(), 6);
}

#[tokio::test]
async fn test_failed_image_does_not_fail_import() {
    let page = r#"<html><head><script type="application/ld+json">
    {
        "@type": "Recipe",
        "name": "Auflauf",
        "image": [
            "https://example.com/1.jpg",
            "https://example.com/2.jpg",
            "https://example.com/3.jpg",
            "https://example.com/4.jpg",
            "https://example.com/5.jpg"
        ]
    }
    </script></head><body></body></html>"#;

    let client = MockClient::new()
        .with_html("https://example.com/auflauf", page)
        .with_image("https://example.com/1.jpg", vec![1u8; 2000], "image/jpeg")
        .with_status("https://example.com/2.jpg", 404)
        .with_image("https://example.com/3.jpg", vec![3u8; 2000], "image/jpeg")
        .with_image("https://example.com/4.jpg", vec![4u8; 2000], "image/jpeg")
        .with_image("https://example.com/5.jpg", vec![5u8; 2000], "image/jpeg");

    let recipe = import_from_url(&client, "https://example.com/auflauf")
        .await
        .unwrap();
    assert_eq!(recipe.images.len(), 4);
}

#[tokio::test]
async fn test_image_count_is_capped_at_five() {
    let image_list: Vec<String> = (1..=7)
        .map(|i| format!("\"https://example.com/{}.jpg\"", i))
        .collect();
    let page = format!(
        r#"<html><head><script type="application/ld+json">
        {{"@type": "Recipe", "name": "Galerie", "image": [{}]}}
        </script></head><body></body></html>"#,
        image_list.join(",")
    );

    let mut client = MockClient::new().with_html("https://example.com/galerie", &page);
    for i in 1..=5 {
        client = client.with_image(
            &format!("https://example.com/{}.jpg", i),
            vec![i as u8; 2000],
            "image/jpeg",
        );
    }
    // URLs 6 and 7 have no mock response; past the cap they must never
    // be requested

    let recipe = import_from_url(&client, "https://example.com/galerie")
        .await
        .unwrap();
    assert_eq!(recipe.images.len(), 5);
}

#[tokio::test]
async fn test_invalid_url_fails_fast() {
    let client = MockClient::new();
    let err = import_from_url(&client, "kein url").await.unwrap_err();
    assert!(matches!(err, ImportError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_fetch_failure_carries_status() {
    let client = MockClient::new().with_status("https://example.com/down", 503);
    let err = import_from_url(&client, "https://example.com/down")
        .await
        .unwrap_err();
    match err {
        ImportError::Fetch(fetch_err) => assert_eq!(fetch_err.status(), Some(503)),
        other => panic!("expected Fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_site_family_supplements_structured_data() {
    // chefkoch host: JSON-LD text fields win, HTML gallery images are
    // appended after the structured-data image
    let page = r#"<html>
<head>
<script type="application/ld+json">
{
    "@type": "Recipe",
    "name": "Szegediner Gulasch von koch99",
    "image": "https://img.chefkoch-cdn.de/rezepte/77/lead.jpg",
    "recipeIngredient": ["500 g Rindfleisch"],
    "recipeInstructions": "Alles schmoren."
}
</script>
</head>
<body>
<h1>Anderer Titel</h1>
<img src="https://img.chefkoch-cdn.de/rezepte/77/galerie-1.jpg">
<img src="https://img.chefkoch-cdn.de/rezepte/77/lead.jpg">
<ul><li class="ingredient">1 kg Kartoffeln</li></ul>
</body>
</html>"#;

    let client = MockClient::new()
        .with_html("https://www.chefkoch.de/rezepte/77/gulasch.html", page)
        .with_image(
            "https://img.chefkoch-cdn.de/rezepte/77/lead.jpg",
            vec![1u8; 2000],
            "image/jpeg",
        )
        .with_image(
            "https://img.chefkoch-cdn.de/rezepte/77/galerie-1.jpg",
            vec![2u8; 2000],
            "image/jpeg",
        );

    let recipe = import_from_url(&client, "https://www.chefkoch.de/rezepte/77/gulasch.html")
        .await
        .unwrap();

    // structured data wins on text fields, author credit stripped
    assert_eq!(recipe.title, "Szegediner Gulasch");
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].name, "Rindfleisch");
    assert_eq!(recipe.instructions, "Alles schmoren.");
    // lead image first, gallery image appended, duplicate dropped
    assert_eq!(recipe.images.len(), 2);
}

#[tokio::test]
async fn test_site_extractor_alone_recovers_recipe() {
    // no JSON-LD at all; the chefkoch scraper still finds the page
    let page = r#"<html><body>
<h1>Omas Linseneintopf</h1>
<table class="ingredients">
<tr><td>250 g</td><td>Linsen</td></tr>
<tr><td>1</td><td>Zwiebel</td></tr>
</table>
<div class="rezept-zubereitung">Linsen waschen.<br>Alles kochen.</div>
</body></html>"#;

    let client = MockClient::new().with_html("https://www.chefkoch.de/rezepte/1/eintopf.html", page);

    let recipe = import_from_url(&client, "https://www.chefkoch.de/rezepte/1/eintopf.html")
        .await
        .unwrap();

    assert_eq!(recipe.title, "Omas Linseneintopf");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].amount, "250 g");
    assert_eq!(recipe.instructions, "Linsen waschen.\nAlles kochen.");
    // defaults applied to everything the page doesn't carry
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.weight_unit, "100g");
}
