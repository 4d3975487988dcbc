use crate::api::analytics::AnalyticsSource;
use crate::commands::{log_fetch_failure, parse_id, CommandContext};
use crate::utils::Table;

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("🌾 Opportunities command called with args: {:?}", args);

    let farm_id = parse_id(args.first(), "farm")?;
    let opportunities = match ctx.client.farm_opportunities(farm_id).await {
        Ok(opportunities) => opportunities,
        Err(e) => {
            log_fetch_failure("farm opportunities", &e);
            Vec::new()
        }
    };

    if opportunities.is_empty() {
        println!("🌾 Farm {} has no investment opportunities", farm_id);
        return Ok(());
    }

    let mut table =
        Table::new(vec!["ID", "Opportunity"]).with_title(&format!("🌾 Opportunities for farm {}", farm_id));
    for opportunity in &opportunities {
        table.add_row(&[opportunity.id.as_str(), opportunity.title.as_str()]);
    }
    println!("{}", table.render());

    Ok(())
}
