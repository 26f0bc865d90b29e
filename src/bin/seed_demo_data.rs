// ABOUTME: Demo data seeder for the Sidequest API
// ABOUTME: Populates Melbourne activity tasks and rewards, then assigns some to each user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Demo data seeder for the Sidequest server.
//!
//! Usage:
//! ```bash
//! # Seed 50 rewards and 50 tasks into the configured database
//! cargo run --bin seed-demo-data
//!
//! # Reproducible run that also creates demo users
//! cargo run --bin seed-demo-data -- --seed 7 --demo-users
//! ```

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sidequest_server::{
    database::Database,
    errors::{AppError, ErrorCode},
    models::{CreateUserRequest, Reward, RewardTier, Task, User},
};
use std::env;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Sidequest Demo Data Seeder",
    long_about = "Populate the database with Melbourne activity tasks and rewards"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Number of rewards and tasks to generate
    #[arg(long, default_value = "50")]
    count: usize,

    /// RNG seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// Also create a handful of demo users with preferences
    #[arg(long)]
    demo_users: bool,

    /// Rewards and tasks assigned to each user
    #[arg(long, default_value = "2")]
    per_user: usize,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

const RESTAURANTS: &[&str] = &[
    "The Pancake Parlour",
    "Chin Chin",
    "Hakata Gensuke",
    "Movida",
    "Gami Chicken",
    "400 Gradi",
];
const SHOPS: &[&str] = &[
    "Myer",
    "David Jones",
    "Nike Store",
    "Apple Store",
    "Uniqlo",
    "JB Hi-Fi",
];
const DISCOUNTS: &[&str] = &[
    "10% Cashback",
    "20% Off",
    "$5 Gift Card",
    "$10 Voucher",
    "Free Dessert",
    "Buy 1 Get 1 Free",
];

const TASK_TYPES: &[&str] = &["explore", "food", "shop", "cultural", "adventure", "social"];
const LOCATIONS: &[&str] = &[
    "Queen Victoria Market",
    "Federation Square",
    "Royal Botanic Gardens",
    "Chadstone Shopping Centre",
    "Hosier Lane",
    "St Kilda Beach",
    "Southbank Promenade",
    "Great Ocean Road",
    "Dandenong Ranges",
    "NGV",
];
const ACTIVITIES: &[&str] = &[
    "Try a new dish at",
    "Take a photo at",
    "Attend a free event at",
    "Explore",
    "Walk along",
    "Buy a souvenir from",
    "Join a guided tour at",
    "Go cycling near",
    "Have a picnic at",
    "Watch the sunset at",
];

/// Demo user configuration
struct DemoUser {
    username: &'static str,
    preferences: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "alex_explorer",
        preferences: &["explore", "adventure"],
    },
    DemoUser {
        username: "sam_foodie",
        preferences: &["food", "social"],
    },
    DemoUser {
        username: "jo_culture",
        preferences: &["cultural", "shop", "explore"],
    },
];

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn generate_rewards(rng: &mut StdRng, count: usize) -> Vec<Reward> {
    (1..=count)
        .map(|i| {
            let place = if rng.gen_bool(0.5) {
                pick(rng, RESTAURANTS)
            } else {
                pick(rng, SHOPS)
            };
            let discount = pick(rng, DISCOUNTS);
            Reward {
                id: Uuid::new_v4(),
                code: format!("REWARD{i:03}"),
                name: format!("{discount} at {place}"),
                description: format!("Enjoy {discount} when you visit {place} in Melbourne."),
                redeemed: false,
            }
        })
        .collect()
}

fn generate_tasks(rng: &mut StdRng, count: usize) -> Vec<Task> {
    (0..count)
        .map(|_| {
            let location = pick(rng, LOCATIONS);
            let tier = RewardTier::ALL
                .choose(rng)
                .copied()
                .unwrap_or(RewardTier::Bronze);
            Task {
                id: Uuid::new_v4(),
                task_type: pick(rng, TASK_TYPES).to_owned(),
                detail: format!("{} {location}", pick(rng, ACTIVITIES)),
                reward_type: tier,
                completion_criteria: format!(
                    "Complete this activity and check-in with a photo at {location}"
                ),
                task_completed: false,
                created_at: chrono::Utc::now(),
            }
        })
        .collect()
}

/// Treat "already there" as success so the seeder can be re-run
fn tolerate_conflict(result: Result<(), AppError>) -> Result<bool, AppError> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.code == ErrorCode::ResourceAlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}

async fn seed_rewards(db: &Database, rewards: &[Reward]) -> Result<usize> {
    let mut created = 0;
    for reward in rewards {
        if tolerate_conflict(db.create_reward(reward).await)? {
            created += 1;
        } else {
            debug!("Reward {} already exists, skipping", reward.code);
        }
    }
    Ok(created)
}

async fn seed_demo_users(db: &Database) -> Result<usize> {
    let mut created = 0;
    for demo in DEMO_USERS {
        let user = User::from_request(CreateUserRequest {
            username: demo.username.to_owned(),
            google_id: None,
            profile_picture: None,
            preferences: demo.preferences.iter().map(|&p| p.to_owned()).collect(),
        });
        if tolerate_conflict(db.create_user(&user).await)? {
            created += 1;
        }
    }
    Ok(created)
}

async fn assign_to_users(db: &Database, rng: &mut StdRng, per_user: usize) -> Result<usize> {
    let users = db.list_users().await?;
    if users.is_empty() {
        warn!("No users found. Skipping user assignment.");
        return Ok(0);
    }

    let rewards = db.list_rewards().await?;
    let tasks = db.list_tasks().await?;

    for user in &users {
        for reward in rewards.choose_multiple(rng, per_user) {
            tolerate_conflict(db.assign_reward(user.id, reward.id).await.map(|_| ()))?;
        }
        for task in tasks.choose_multiple(rng, per_user) {
            tolerate_conflict(db.assign_task(user.id, task.id).await.map(|_| ()))?;
        }
    }
    Ok(users.len())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Sidequest Demo Data Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/sidequest.db".into());
    info!("Connecting to database: {}", database_url);
    let db = Database::new(&database_url).await?;

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    info!("Step 1: Creating rewards...");
    let rewards = generate_rewards(&mut rng, args.count);
    let created = seed_rewards(&db, &rewards).await?;
    info!("  Created {} rewards ({} already present)", created, rewards.len() - created);

    info!("Step 2: Creating tasks...");
    let tasks = generate_tasks(&mut rng, args.count);
    for task in &tasks {
        db.create_task(task).await?;
    }
    info!("  Created {} tasks", tasks.len());

    if args.demo_users {
        info!("Step 3: Creating demo users...");
        let created = seed_demo_users(&db).await?;
        info!("  Created {} demo users", created);
    }

    info!("Step 4: Assigning rewards and tasks to users...");
    let users = assign_to_users(&db, &mut rng, args.per_user).await?;
    info!("  Updated {} users", users);

    info!("=== Seeding complete ===");
    Ok(())
}
