//! Demo menu seed script
//!
//! Populates `menu_items` with the truck's launch menu so a fresh
//! deployment has something to show. Skips seeding when the table already
//! has rows unless --force is passed (--force wipes the table first).
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--force]

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::env;

#[derive(Parser)]
#[command(about = "Seed the menu with demo items")]
struct Args {
    /// Delete existing menu items and reseed from scratch
    #[arg(long)]
    force: bool,
}

const MENU: &[(&str, &str, &str, &str)] = &[
    // (name, description, price, category)
    ("Lemon Pepper Wings", "Crispy wings tossed in our signature lemon pepper seasoning", "$12.99", "Wings"),
    ("Hot Wings", "Classic buffalo hot wings with a kick", "$12.99", "Wings"),
    ("BBQ Wings", "Sweet and tangy barbecue glazed wings", "$12.99", "Wings"),
    ("Honey Hot Wings", "Perfect balance of sweet honey and spicy heat", "$12.99", "Wings"),
    ("Garlic Parmesan Wings", "Savory garlic and parmesan cheese coating", "$12.99", "Wings"),
    ("Mango Habanero Wings", "Tropical sweetness meets fiery habanero", "$12.99", "Wings"),
    ("Classic Philly Cheesesteak", "Thinly sliced ribeye, grilled onions, peppers, and melted cheese", "$14.99", "Sandwiches & Cheesesteaks"),
    ("Chicken Cheesesteak", "Grilled chicken breast with peppers, onions, and cheese", "$13.99", "Sandwiches & Cheesesteaks"),
    ("BBQ Chicken Sandwich", "Pulled BBQ chicken with coleslaw on a brioche bun", "$12.99", "Sandwiches & Cheesesteaks"),
    ("Buffalo Chicken Sandwich", "Crispy chicken tossed in buffalo sauce with ranch", "$12.99", "Sandwiches & Cheesesteaks"),
    ("Classic Mac & Cheese", "Creamy three-cheese mac and cheese", "$8.99", "Mac & Cheese Bowls"),
    ("Buffalo Chicken Mac", "Mac and cheese topped with buffalo chicken", "$13.99", "Mac & Cheese Bowls"),
    ("BBQ Pulled Pork Mac", "Mac and cheese with slow-cooked BBQ pulled pork", "$14.99", "Mac & Cheese Bowls"),
    ("Lobster Mac & Cheese", "Premium lobster meat in creamy cheese sauce", "$18.99", "Mac & Cheese Bowls"),
    ("Philly Cheese Fries", "Fries topped with steak, cheese, peppers, and onions", "$11.99", "Loaded Fries"),
    ("Buffalo Chicken Fries", "Crispy fries with buffalo chicken and ranch drizzle", "$11.99", "Loaded Fries"),
    ("Bacon Cheese Fries", "Loaded with crispy bacon and melted cheese", "$9.99", "Loaded Fries"),
    ("Cajun Fries", "Seasoned fries with bold Cajun spices", "$7.99", "Loaded Fries"),
    ("Red Velvet Waffles", "Rich red velvet waffles with cream cheese drizzle", "$9.99", "Waffles & Sweets"),
    ("Chicken & Waffles", "Crispy fried chicken on golden Belgian waffles", "$15.99", "Waffles & Sweets"),
    ("Churro Waffles", "Cinnamon sugar waffles with caramel sauce", "$8.99", "Waffles & Sweets"),
    ("French Fries", "Crispy golden french fries", "$4.99", "Sides"),
    ("Onion Rings", "Beer-battered onion rings", "$5.99", "Sides"),
    ("Coleslaw", "Creamy homemade coleslaw", "$3.99", "Sides"),
    ("Soft Drinks", "Coke, Sprite, Dr Pepper, Fanta", "$2.99", "Beverages"),
    ("Sweet Tea", "Southern-style sweet tea", "$2.99", "Beverages"),
    ("Lemonade", "Freshly made lemonade", "$3.49", "Beverages"),
    ("Bottled Water", "Premium bottled water", "$1.99", "Beverages"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Demo Menu ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
        .fetch_one(&pool)
        .await?;

    if existing > 0 {
        if !args.force {
            println!("Database already has {existing} menu items. Skipping seed.");
            println!("Pass --force to wipe and reseed.");
            return Ok(());
        }
        println!("Removing {existing} existing menu items...");
        sqlx::query("DELETE FROM menu_items").execute(&pool).await?;
    }

    for (name, description, price, category) in MENU {
        sqlx::query(
            "INSERT INTO menu_items (name, description, price, category)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert {name:?}"))?;
    }

    println!("Seeded {} menu items.", MENU.len());
    Ok(())
}
