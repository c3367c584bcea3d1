//! Feedmix MCP Server Implementation
//!
//! Implements the MCP server with all Feedmix tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::formulation::{RationError, RationItem};
use crate::models::{IngredientCreate, WeightCategory};
use crate::tools::status::StatusTracker;
use crate::tools::{ingredients, ration, standards};

/// Feedmix MCP Service
#[derive(Clone)]
pub struct FeedmixService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<FeedmixService>,
}

impl FeedmixService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

/// Client errors become invalid_params, catalog failures internal errors
fn to_mcp_error(err: RationError) -> McpError {
    if err.is_client_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Catalog Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListStandardsParams {
    /// Species filter, e.g. BOVINE, CAPRINE, POULTRY (optional, case-insensitive)
    pub species: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TenantParams {
    /// Tenant (farm) id; global presets are always included
    pub tenant_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIngredientParams {
    pub tenant_id: String,
    /// Ingredient id
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddIngredientParams {
    /// Owning tenant; the ingredient is private to it
    pub tenant_id: String,
    pub name: String,
    /// Dry matter %
    pub dry_matter: f64,
    /// Crude protein %
    pub crude_protein: f64,
    #[serde(default)]
    pub crude_fiber: f64,
    #[serde(default)]
    pub crude_fat: f64,
    #[serde(default)]
    pub ash: f64,
    #[serde(default)]
    pub calcium: f64,
    #[serde(default)]
    pub phosphorus: f64,
    /// Metabolizable energy, kcal/kg
    pub metabolizable_energy: f64,
    pub tdn: Option<f64>,
    pub ndf: Option<f64>,
    pub price_per_kg: f64,
    /// Stock on hand in kg (default 0)
    #[serde(default)]
    pub stock: f64,
    /// light, medium or heavy (default medium)
    pub category: Option<String>,
}

// ============================================================================
// Ration Parameter Structs
// ============================================================================

/// One ration line
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RationItemParam {
    pub ingredient_id: String,
    /// Share of the mix by weight, in percent
    pub percentage: f64,
}

impl From<RationItemParam> for RationItem {
    fn from(p: RationItemParam) -> Self {
        RationItem::new(p.ingredient_id, p.percentage)
    }
}

fn to_items(items: Vec<RationItemParam>) -> Vec<RationItem> {
    items.into_iter().map(RationItem::from).collect()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateRationParams {
    pub tenant_id: String,
    /// Ingredients with percentages that must total 100
    pub items: Vec<RationItemParam>,
    /// Nutrient standard to compare against (optional)
    pub standard_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PearsonSquareParams {
    pub tenant_id: String,
    pub ingredient_a_id: String,
    pub ingredient_b_id: String,
    /// Target crude protein %, strictly between the two ingredients
    pub target_protein: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanBatchParams {
    pub tenant_id: String,
    pub items: Vec<RationItemParam>,
    /// Batch size in kg
    pub batch_kg: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertQuantityParams {
    pub tenant_id: String,
    pub ingredient_id: String,
    pub quantity: f64,
    /// kg, g, t, lb, oz, l, ml, bucket, m3
    pub from_unit: String,
    pub to_unit: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FeedmixService {
    // --- Status ---

    #[tool(description = "Get the current status of the Feedmix service including build info, database status, and process information")]
    async fn feedmix_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        json_result(&status)
    }

    // --- Catalog ---

    #[tool(description = "List NRC nutrient requirement standards, optionally filtered by species")]
    fn list_nutrient_standards(&self, Parameters(p): Parameters<ListStandardsParams>) -> Result<CallToolResult, McpError> {
        let result = standards::list_nutrient_standards(&self.database, p.species.as_deref()).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "List feed ingredients visible to a tenant (global presets plus the tenant's own feeds)")]
    fn list_feed_ingredients(&self, Parameters(p): Parameters<TenantParams>) -> Result<CallToolResult, McpError> {
        let result = ingredients::list_feed_ingredients(&self.database, &p.tenant_id).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Get the full nutrient profile, price and stock of a feed ingredient")]
    fn get_feed_ingredient(&self, Parameters(p): Parameters<GetIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = ingredients::get_feed_ingredient(&self.database, &p.tenant_id, &p.id).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Create a tenant-private feed ingredient")]
    fn add_feed_ingredient(&self, Parameters(p): Parameters<AddIngredientParams>) -> Result<CallToolResult, McpError> {
        let category = match p.category.as_deref() {
            None => WeightCategory::default(),
            Some(s) => WeightCategory::parse(s).ok_or_else(|| {
                McpError::invalid_params(format!("unknown category '{}', expected light, medium or heavy", s), None)
            })?,
        };
        let data = IngredientCreate {
            name: p.name, dry_matter: p.dry_matter, crude_protein: p.crude_protein,
            crude_fiber: p.crude_fiber, crude_fat: p.crude_fat, ash: p.ash,
            calcium: p.calcium, phosphorus: p.phosphorus, metabolizable_energy: p.metabolizable_energy,
            tdn: p.tdn, ndf: p.ndf, price_per_kg: p.price_per_kg, stock: p.stock, category,
        };
        let result = ingredients::add_feed_ingredient(&self.database, &p.tenant_id, data).map_err(to_mcp_error)?;
        json_result(&result)
    }

    // --- Formulation ---

    #[tool(description = "Calculate the weighted nutrient profile and cost per kg of a ration. Percentages must total 100 (±0.01). Optionally compare against a nutrient standard (minimum requirements).")]
    fn calculate_ration(&self, Parameters(p): Parameters<CalculateRationParams>) -> Result<CallToolResult, McpError> {
        let items = to_items(p.items);
        let result = ration::calculate_ration(&self.database, &p.tenant_id, &items, p.standard_id.as_deref())
            .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Pearson square: mix two feed ingredients to hit a target crude protein percentage")]
    fn calculate_pearson_square(&self, Parameters(p): Parameters<PearsonSquareParams>) -> Result<CallToolResult, McpError> {
        let result = ration::calculate_pearson_square(
            &self.database, &p.tenant_id, &p.ingredient_a_id, &p.ingredient_b_id, p.target_protein,
        )
        .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Scale a ration to a batch weight: kg, volume, cost and stock check per ingredient")]
    fn plan_ration_batch(&self, Parameters(p): Parameters<PlanBatchParams>) -> Result<CallToolResult, McpError> {
        let items = to_items(p.items);
        let result = ration::plan_ration_batch(&self.database, &p.tenant_id, &items, p.batch_kg)
            .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Convert a quantity of a feed ingredient between mass and volume units using its bulk density")]
    fn convert_feed_quantity(&self, Parameters(p): Parameters<ConvertQuantityParams>) -> Result<CallToolResult, McpError> {
        let result = ration::convert_feed_quantity(
            &self.database, &p.tenant_id, &p.ingredient_id, p.quantity, &p.from_unit, &p.to_unit,
        )
        .map_err(to_mcp_error)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FeedmixService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "feedmix".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Feedmix ration formulation".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Feedmix - livestock ration formulation. Every catalog and formulation tool takes a tenant_id; \
                 global master feeds are visible to all tenants, custom feeds only to their owner. \
                 Catalog: list_nutrient_standards, list/get/add_feed_ingredient. \
                 Formulation: calculate_ration (percentages must total 100), calculate_pearson_square, \
                 plan_ration_batch, convert_feed_quantity. Status: feedmix_status."
                    .into(),
            ),
        }
    }
}
