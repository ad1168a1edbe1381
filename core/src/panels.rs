//! One panel per dashboard tab.
//!
//! Registration order matches the navigation order in `Tab::ALL`.

use crate::{
    aggregate::{
        best_model, churn_metric_cards, contract_breakdown, ranked_features, segment_breakdown,
        CustomerSummary, MetricCard, ModelMetric, SalesSummary, Trend,
    },
    chart::{
        model_comparison_chart, monthly_sales_chart, quarterly_revenue_vs_churn_chart,
        risk_distribution_chart, segment_chart,
    },
    error::DashResult,
    format::{
        format_count, format_currency, format_currency_whole, format_percent, format_probability,
    },
    panel::{Panel, PanelContext, PanelReport, Section, Tab},
    records::QuarterlySales,
    risk::RiskDistribution,
    view::TableRow,
};

/// All panels in navigation order.
pub fn all_panels() -> Vec<Box<dyn Panel>> {
    vec![
        Box::new(OverviewPanel),
        Box::new(ChurnPanel),
        Box::new(SalesPanel),
        Box::new(CustomersPanel),
        Box::new(ModelsPanel),
    ]
}

// ── Overview ─────────────────────────────────────────────────────────────────

pub struct OverviewPanel;

impl Panel for OverviewPanel {
    fn tab(&self) -> Tab { Tab::Overview }

    fn render(&self, ctx: &PanelContext<'_>) -> DashResult<PanelReport> {
        let mut report = PanelReport::new(Tab::Overview, "Revenue vs Churn Rate Trends");

        let mut cards = churn_metric_cards(&ctx.data.churn_metrics);
        if let Some(change) = quarter_over_quarter_churn(&ctx.data.sales.quarterly) {
            if let Some(card) = cards.iter_mut().find(|c| c.title == "Churn Rate") {
                *card = card.clone().with_change(change.0, change.1);
            }
        }
        report.cards = cards;

        let thresholds = &ctx.config.risk_thresholds;
        let dist = RiskDistribution::from_records(ctx.visible.iter().copied(), thresholds);

        let mut tiers = Section::new("Risk Distribution", &["Tier", "Customers", "Share"]);
        for t in &dist.tiers {
            tiers.push_row(vec![
                t.tier.label().into(),
                format_count(t.count as u64),
                format_percent(t.share),
            ]);
        }
        report.sections.push(tiers);

        report.charts.push(quarterly_revenue_vs_churn_chart(ctx.data));
        report.charts.push(risk_distribution_chart(&dist));
        Ok(report)
    }
}

/// Change in churn rate between the last two quarters.
/// A falling churn rate is a positive trend.
fn quarter_over_quarter_churn(quarters: &[QuarterlySales]) -> Option<(String, Trend)> {
    let [.., prev, last] = quarters else {
        return None;
    };
    let delta = last.churn_rate - prev.churn_rate;
    let trend = if delta <= 0.0 { Trend::Positive } else { Trend::Negative };
    Some((format!("{delta:+.1}% from {}", prev.quarter), trend))
}

// ── Churn prediction ─────────────────────────────────────────────────────────

pub struct ChurnPanel;

impl Panel for ChurnPanel {
    fn tab(&self) -> Tab { Tab::Churn }

    fn render(&self, ctx: &PanelContext<'_>) -> DashResult<PanelReport> {
        let mut report = PanelReport::new(Tab::Churn, "Churn Prediction Analysis");
        let thresholds = &ctx.config.risk_thresholds;

        report.cards = CustomerSummary::from_records(ctx.visible.iter().copied(), thresholds).cards();

        let columns: Vec<String> = [
            "Customer", "Age", "Churn Risk", "Risk Level", "Tenure", "Monthly Charges",
            "Total Charges", "Segment", "Last Activity",
        ]
        .iter()
        .map(|c| ctx.view.header(c))
        .collect();
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        let mut table = Section::new("Customer Churn Predictions", &columns);
        for record in ctx.visible {
            let row = TableRow::new(record, thresholds);
            table.push_row(vec![
                row.name,
                row.age.to_string(),
                row.churn_risk,
                row.tier.label().into(),
                row.tenure,
                row.monthly_charges,
                row.total_charges,
                row.segment,
                row.last_activity,
            ]);
        }
        report.sections.push(table);

        let mut features = Section::new("Feature Importance", &["Feature", "Importance", "Description"]);
        for f in ranked_features(&ctx.data.feature_importance) {
            features.push_row(vec![
                f.feature.clone(),
                format_probability(f.importance),
                f.description.clone(),
            ]);
        }
        report.sections.push(features);

        let dist = RiskDistribution::from_records(ctx.visible.iter().copied(), thresholds);
        report.charts.push(risk_distribution_chart(&dist));
        Ok(report)
    }
}

// ── Sales ────────────────────────────────────────────────────────────────────

pub struct SalesPanel;

impl Panel for SalesPanel {
    fn tab(&self) -> Tab { Tab::Sales }

    fn render(&self, ctx: &PanelContext<'_>) -> DashResult<PanelReport> {
        let mut report = PanelReport::new(Tab::Sales, "Monthly Sales Performance");
        let summary = SalesSummary::from_sales(&ctx.data.sales);

        report.cards = vec![
            MetricCard::new("Total Sales", format_currency_whole(summary.total_sales)),
            MetricCard::new("Avg Monthly Sales", format_currency_whole(summary.avg_monthly_sales)),
            MetricCard::new("Total Transactions", format_count(summary.total_transactions)),
        ];

        let mut growth = Section::new("Monthly Growth", &["Month", "Sales", "Growth"]);
        for (point, month) in summary.growth.iter().zip(&ctx.data.sales.monthly) {
            growth.push_row(vec![
                point.month.clone(),
                format_currency_whole(month.sales),
                point.growth.map(format_percent).unwrap_or_else(|| "-".into()),
            ]);
        }
        report.sections.push(growth);

        let mut quarters = Section::new("Quarterly", &["Quarter", "Sales", "Churn Rate"]);
        for q in &ctx.data.sales.quarterly {
            quarters.push_row(vec![
                q.quarter.clone(),
                format_currency_whole(q.sales),
                format_percent(q.churn_rate),
            ]);
        }
        report.sections.push(quarters);

        report.charts.push(monthly_sales_chart(ctx.data));
        Ok(report)
    }
}

// ── Customer insights ────────────────────────────────────────────────────────

pub struct CustomersPanel;

impl Panel for CustomersPanel {
    fn tab(&self) -> Tab { Tab::Customers }

    fn render(&self, ctx: &PanelContext<'_>) -> DashResult<PanelReport> {
        let mut report = PanelReport::new(Tab::Customers, "Customer Segmentation");

        let chart = segment_chart(&ctx.data.segments);
        let shares = chart.shares();

        let mut segments = Section::new(
            "Segments",
            &["Segment", "Customers", "Share", "Avg Revenue", "Churn Rate"],
        );
        for (s, (_, share)) in ctx.data.segments.iter().zip(&shares) {
            segments.push_row(vec![
                s.segment.clone(),
                format_count(s.count),
                format_percent(*share),
                format_currency_whole(s.avg_revenue),
                format_percent(s.churn_rate),
            ]);
        }
        report.sections.push(segments);

        let mut analysis = Section::new(
            "Segment Analysis",
            &["Segment", "Customers", "Avg Monthly Charges", "Avg Churn Risk", "Avg Tenure", "Avg Age"],
        );
        for s in segment_breakdown(ctx.visible.iter().copied()) {
            analysis.push_row(vec![
                s.segment,
                format_count(s.count as u64),
                format_currency(s.avg_monthly_charges),
                format_probability(s.avg_churn_probability),
                format!("{:.1}", s.avg_tenure),
                format!("{:.1}", s.avg_age),
            ]);
        }
        report.sections.push(analysis);

        let contracts = contract_breakdown(ctx.visible.iter().copied());
        if !contracts.is_empty() {
            let mut section = Section::new("Contract Types", &["Contract", "Customers", "Avg Churn Risk"]);
            for c in contracts {
                section.push_row(vec![
                    c.contract.label().into(),
                    format_count(c.count as u64),
                    format_probability(c.avg_churn_probability),
                ]);
            }
            report.sections.push(section);
        }

        report.charts.push(chart);
        Ok(report)
    }
}

// ── Models ───────────────────────────────────────────────────────────────────

pub struct ModelsPanel;

impl Panel for ModelsPanel {
    fn tab(&self) -> Tab { Tab::Models }

    fn render(&self, ctx: &PanelContext<'_>) -> DashResult<PanelReport> {
        let mut report = PanelReport::new(Tab::Models, "ML Model Performance Comparison");
        let models = &ctx.data.model_performance;

        for metric in ModelMetric::ALL {
            if let Some(best) = best_model(models, metric) {
                report.cards.push(MetricCard::new(
                    &format!("Best {}", metric.label()),
                    format!("{} ({})", best.model, format_probability(metric.value(best))),
                ));
            }
        }

        let mut table = Section::new(
            "Detailed Model Metrics",
            &["Model", "Accuracy", "Precision", "Recall", "F1-Score"],
        );
        for m in models {
            let mut row = vec![m.model.clone()];
            row.extend(ModelMetric::ALL.iter().map(|metric| format_probability(metric.value(m))));
            table.push_row(row);
        }
        report.sections.push(table);

        report.charts.push(model_comparison_chart(models));
        Ok(report)
    }
}
