use log::error;
use recipe_finder::{client_from_env, ProviderError, Recipe};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-finder <random | search INGREDIENT... | get ID | autocomplete QUERY>";

fn print_recipe(recipe: &Recipe) {
    match recipe.id {
        Some(id) => println!("# {} ({})", recipe.title, id),
        None => println!("# {}", recipe.title),
    }

    if let (Some(used), Some(missed)) = (recipe.used_ingredient_count, recipe.missed_ingredient_count) {
        println!("uses {} of your ingredients, missing {}", used, missed);
    }
    if let Some(minutes) = recipe.ready_in_minutes {
        println!("ready in {} minutes", minutes);
    }
    if let Some(summary) = recipe.summary_text() {
        println!("\n{}", summary);
    }

    if !recipe.steps.is_empty() {
        println!();
        for (i, step) in recipe.steps.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
    } else if let Some(instructions) = recipe.instructions_text() {
        println!("\n{}", instructions);
    }
    println!();
}

async fn run(args: &[String]) -> Result<Vec<Recipe>, Box<dyn std::error::Error>> {
    let command = args.get(1).ok_or(USAGE)?;
    let client = client_from_env()?;

    let recipes = match command.as_str() {
        "random" => vec![client.fetch_random_recipe().await?],
        "search" => {
            let ingredients = &args[2..];
            if ingredients.is_empty() {
                return Err(USAGE.into());
            }
            client.find_by_ingredients(ingredients).await?
        }
        "get" => {
            let id: i64 = args.get(2).ok_or(USAGE)?.parse()?;
            vec![client.fetch_by_id(id).await?]
        }
        "autocomplete" => {
            let query = args[2..].join(" ");
            if query.is_empty() {
                return Err(USAGE.into());
            }
            client.autocomplete(&query).await?
        }
        _ => return Err(USAGE.into()),
    };

    Ok(recipes)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match run(&args).await {
        Ok(recipes) => {
            if recipes.is_empty() {
                println!("No recipes found.");
            }
            for recipe in &recipes {
                print_recipe(recipe);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<ProviderError>() {
                Some(provider) => error!("Request failed ({}): {}", provider.status_code(), provider),
                None => error!("{}", e),
            }
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
