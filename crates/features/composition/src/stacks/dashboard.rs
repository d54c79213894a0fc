use super::application::ApplicationStack;
use super::{UnitMeta, deployment_unit};
use genu_domain::config::StackConfig;
use genu_domain::registry::Outputs;
use genu_domain::units::UnitKind;
use serde::Serialize;

/// Usage dashboard; reads the application's identity handles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStack {
    pub meta: UnitMeta,
    pub dashboard_name: String,
    pub user_pool_id: String,
    pub user_pool_client_id: String,
    /// Region of the application the dashboard reports on.
    pub app_region: String,
}

impl DashboardStack {
    pub fn new(config: &StackConfig, application: &ApplicationStack) -> Self {
        let meta = UnitMeta::singleton(UnitKind::Dashboard, config, &config.model_region);
        Self {
            dashboard_name: format!("GenerativeAiUseCasesDashboard{}", config.env),
            user_pool_id: application.user_pool_id.clone(),
            user_pool_client_id: application.user_pool_client_id.clone(),
            app_region: config.region.clone(),
            meta,
        }
    }

    fn collect_outputs(&self) -> Outputs {
        Outputs::from([("dashboardName", self.dashboard_name.clone())])
    }
}

deployment_unit!(DashboardStack);
