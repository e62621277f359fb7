use mockito::Matcher;
use recipe_finder::{ProviderError, RecipeClient};
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> RecipeClient {
    RecipeClient::builder()
        .api_key("test-key")
        .base_url(server.url())
        .build()
        .unwrap()
}

fn recipe_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "image": format!("https://img.spoonacular.com/recipes/{}-556x370.jpg", id),
        "imageType": "jpg",
        "servings": 4,
        "readyInMinutes": 30,
        "sourceUrl": "https://example.com/recipe",
        "healthScore": 42.0,
        "pricePerServing": 120.5,
        "vegetarian": true,
        "vegan": false,
        "glutenFree": true,
        "dairyFree": false,
        "veryHealthy": false,
        "cheap": false,
        "veryPopular": true,
        "sustainable": false,
        "summary": "A <b>tasty</b> dish &amp; more",
        "instructions": "<ol><li>Cook</li><li>Eat</li></ol>",
        "extendedIngredients": [
            {"id": 11529, "name": "tomato", "original": "2 tomatoes", "amount": 2.0, "unit": "", "meta": []}
        ],
        "analyzedInstructions": [
            {"name": "", "steps": [
                {"number": 1, "step": "Cook.", "ingredients": [], "equipment": []},
                {"number": 2, "step": "Eat.", "ingredients": [], "equipment": []}
            ]}
        ]
    })
}

#[tokio::test]
async fn test_random_recipe() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
            Matcher::UrlEncoded("number".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"recipes": [recipe_json(1, "Tomato Soup")]}).to_string())
        .create();

    let recipe = client_for(&server).fetch_random_recipe().await.unwrap();
    assert_eq!(recipe.title, "Tomato Soup");
    assert_eq!(recipe.steps, vec!["Cook.", "Eat."]);
    assert_eq!(recipe.summary_text().as_deref(), Some("A tasty dish & more"));
    mock.assert();
}

#[tokio::test]
async fn test_random_recipe_empty() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"recipes": []}"#)
        .create();

    let result = client_for(&server).fetch_random_recipe().await;
    assert!(matches!(result, Err(ProviderError::EmptyResult)));
}

#[tokio::test]
async fn test_http_error_carries_status_and_message() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::Any)
        .with_status(402)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "failure", "code": 402, "message": "Daily points limit reached"}"#)
        .create();

    let err = client_for(&server).fetch_random_recipe().await.unwrap_err();
    assert_eq!(err.status_code(), 402);
    match err {
        ProviderError::Http { code, message } => {
            assert_eq!(code, 402);
            assert_eq!(message, "Daily points limit reached");
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_find_by_ingredients_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
            Matcher::UrlEncoded("ingredients".into(), "tomato,basil".into()),
            Matcher::UrlEncoded("number".into(), "10".into()),
            Matcher::UrlEncoded("ignorePantry".into(), "false".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let recipes = client_for(&server)
        .find_by_ingredients(&["tomato", "basil"])
        .await
        .unwrap();
    assert!(recipes.is_empty());
    mock.assert();
}

#[tokio::test]
async fn test_find_by_ingredients_results() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 10, "title": "Caprese Salad", "image": "https://img.spoonacular.com/recipes/10.jpg",
                 "imageType": "jpg", "usedIngredientCount": 2, "missedIngredientCount": 1, "likes": 12,
                 "usedIngredients": [], "missedIngredients": [], "unusedIngredients": []},
                {"id": 11, "title": "Bruschetta", "usedIngredientCount": 2, "missedIngredientCount": 2}
            ]"#,
        )
        .create();

    let recipes = client_for(&server)
        .find_by_ingredients(&["tomato".to_string(), "basil".to_string()])
        .await
        .unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].title, "Caprese Salad");
    assert_eq!(recipes[0].missed_ingredient_count, Some(1));
    assert!(recipes[1].image.is_none());
    // Flags are unknown for search results, not false
    assert!(recipes[0].vegan.is_none());
}

#[tokio::test]
async fn test_fetch_by_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/716429/information")
        .match_query(Matcher::UrlEncoded("apiKey".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(recipe_json(716429, "Pasta").to_string())
        .create();

    let recipe = client_for(&server).fetch_by_id(716429).await.unwrap();
    assert_eq!(recipe.id, Some(716429));
    assert_eq!(recipe.ketogenic, Some(false));
    assert_eq!(recipe.vegetarian, Some(true));
    mock.assert();
}

#[tokio::test]
async fn test_fetch_by_id_null_body() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/5/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("null")
        .create();

    let result = client_for(&server).fetch_by_id(5).await;
    assert!(matches!(result, Err(ProviderError::EmptyResult)));
}

#[tokio::test]
async fn test_fetch_by_id_unexpected_shape() {
    let mut server = mockito::Server::new_async().await;
    let mut payload = recipe_json(6, "No Id");
    payload.as_object_mut().unwrap().remove("id");
    let _m = server
        .mock("GET", "/recipes/6/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(payload.to_string())
        .create();

    let result = client_for(&server).fetch_by_id(6).await;
    assert!(matches!(result, Err(ProviderError::Transport(_))));
}

#[tokio::test]
async fn test_fetch_by_id_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/7/information")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("")
        .create();

    let err = client_for(&server).fetch_by_id(7).await.unwrap_err();
    assert!(matches!(err, ProviderError::Http { code: 404, .. }));
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on port 1
    let client = RecipeClient::builder()
        .api_key("test-key")
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.fetch_random_recipe().await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)));
    assert_eq!(err.status_code(), 500);
}
