use log::{debug, info};
use std::collections::HashMap;

use crate::client::FacebookClient;
use crate::constants::DEFAULT_PAGE_LIMIT;
use crate::error::Result;
use crate::resources::{
    AdAccount, AdInsight, AdSet, DateRange, InsightLevel, InsightsQuery, ACTIVE_ONLY,
};

const INSIGHT_FIELDS: &[&str] = &["adset_id", "spend", "impressions", "clicks"];

/// Fetches an account, its active ad sets and their insights for `range`,
/// and renders one line per item.
pub async fn account_summary(
    client: &FacebookClient,
    account_id: &str,
    range: DateRange,
) -> Result<Vec<String>> {
    let account = AdAccount::find(client, account_id).await?;
    info!(
        "Building summary for {}",
        account.id.as_deref().unwrap_or(account_id)
    );

    let ad_sets = account
        .ad_sets(client, ACTIVE_ONLY, DEFAULT_PAGE_LIMIT)
        .await?;

    let insights = if ad_sets.is_empty() {
        Vec::new()
    } else {
        let query = InsightsQuery::new(range)
            .level(InsightLevel::Adset)
            .fields(INSIGHT_FIELDS.iter().copied());
        account.ad_insights(client, &query).await?
    };
    debug!("{} ad sets, {} insight rows", ad_sets.len(), insights.len());

    Ok(summarize(&account, &ad_sets, &insights))
}

pub fn summarize(account: &AdAccount, ad_sets: &[AdSet], insights: &[AdInsight]) -> Vec<String> {
    let account_name = account
        .name
        .as_deref()
        .or(account.id.as_deref())
        .unwrap_or("Unknown");
    let currency = account.currency.as_deref().unwrap_or("");

    let mut messages = vec![format!(
        "💰 Account {}: balance {}, spent {}",
        account_name,
        format_amount(account.balance.as_deref(), currency),
        format_amount(account.amount_spent.as_deref(), currency),
    )];

    if ad_sets.is_empty() {
        messages.push(format!("🔍 Account {} has no active ad sets", account_name));
        return messages;
    }

    let by_ad_set: HashMap<&str, &AdInsight> = insights
        .iter()
        .filter_map(|i| i.adset_id.as_deref().map(|id| (id, i)))
        .collect();

    for ad_set in ad_sets {
        let name = ad_set.name.as_deref().unwrap_or("Unnamed");
        let insight = ad_set.id.as_deref().and_then(|id| by_ad_set.get(id));
        let spend = insight.and_then(|i| i.spend()).unwrap_or(0.0);
        let impressions = insight.and_then(|i| i.impressions()).unwrap_or(0);
        let clicks = insight.and_then(|i| i.clicks()).unwrap_or(0);

        let active = ad_set.effective_status.as_deref().map_or(true, |s| s == "ACTIVE");
        let marker = if active { "🟢 Ad set active" } else { "❌ Ad set paused" };
        messages.push(format!(
            "{}: {}: 💰{:.2} 👁 {} 🖱 {}",
            marker, name, spend, impressions, clicks
        ));
    }

    messages
}

/// Currencies Graph reports with an offset of 1 instead of 100.
const WHOLE_UNIT_CURRENCIES: &[&str] = &[
    "CLP", "COP", "CRC", "HUF", "ISK", "IDR", "JPY", "KRW", "PYG", "TWD", "VND",
];

/// Account amounts are in the currency's minor unit (cents, satang).
fn format_amount(minor_units: Option<&str>, currency: &str) -> String {
    let value = minor_units
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    let amount = if WHOLE_UNIT_CURRENCIES.contains(&currency) {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value / 100.0)
    };
    if currency.is_empty() {
        amount
    } else {
        format!("{} {}", amount, currency)
    }
}
