use crate::config::AppConfig;
use crate::generator::{HttpMealPlanGenerator, MealPlanGenerator};
use crate::plans::repo::{MealPlanStore, PgMealPlanStore};
use crate::profile::repo::{PgProfileStore, ProfileStore};
use crate::sessions::{InFlight, WizardSessions};
use crate::shopping::stock::{PgStockStore, StockStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub profiles: Arc<dyn ProfileStore>,
    pub plans: Arc<dyn MealPlanStore>,
    pub stock: Arc<dyn StockStore>,
    pub generator: Arc<dyn MealPlanGenerator>,
    pub wizards: WizardSessions,
    pub in_flight: InFlight,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await?;

        if config.meal_plan_api_url.is_none() {
            tracing::warn!("MEAL_PLAN_API_URL not set; plan generation will fail");
        }
        let generator = Arc::new(HttpMealPlanGenerator::new(
            config.meal_plan_api_url.clone(),
        )?) as Arc<dyn MealPlanGenerator>;

        Ok(Self::from_parts(
            db.clone(),
            config,
            Arc::new(PgProfileStore::new(db.clone())),
            Arc::new(PgMealPlanStore::new(db.clone())),
            Arc::new(PgStockStore::new(db)),
            generator,
        ))
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        profiles: Arc<dyn ProfileStore>,
        plans: Arc<dyn MealPlanStore>,
        stock: Arc<dyn StockStore>,
        generator: Arc<dyn MealPlanGenerator>,
    ) -> Self {
        Self {
            db,
            config,
            profiles,
            plans,
            stock,
            generator,
            wizards: WizardSessions::default(),
            in_flight: InFlight::default(),
        }
    }
}
