use blume_admin_mock::{
    config::{AppConfig, MockSettings},
    logging::init_tracing,
    mock_client::MockApiClient,
    query::ListParams,
    services::InMemoryService,
};

#[tokio::main]
async fn main() {
    init_tracing();
    let config = AppConfig::from_env();
    let service = InMemoryService::from_config(&config.dataset);
    let client = MockApiClient::new(service, MockSettings::instant());

    match client.get_dashboard_stats().await {
        Ok(stats) => {
            println!(
                "users: {} total, {} active, {} new today",
                stats.users.total, stats.users.active, stats.users.new_today
            );
            println!(
                "plans: {} total, {} completed ({:.1}% success)",
                stats.plans.total, stats.plans.completed, stats.plans.success_rate
            );
            println!(
                "revenue: ${:.2}, {} BP circulating",
                stats.financial.revenue_usd, stats.financial.total_bp_circulating
            );
        }
        Err(error) => eprintln!("dashboard stats -> {error}"),
    }

    let params = ListParams::new().limit(5).filter("status", "active");
    match client.get_users(&params).await {
        Ok(page) => {
            println!("active users (page 1 of {}):", page.total_pages);
            for user in page.data {
                println!(
                    "  {:<24} level {} {:>7} BP  {}",
                    user.username, user.profile_level, user.wallet.beens_points, user.email
                );
            }
        }
        Err(error) => eprintln!("get_users -> {error}"),
    }
}
