//! board-runner: headless runner for the churn dashboard.
//!
//! Usage:
//!   board-runner --tab churn --query sar --sort tenure --order asc
//!   board-runner --data-dir ./data --risk high --range 90d
//!   board-runner --generate 500 --contract month-to-month --sort total_charges
//!   board-runner --generate 1000 --seed 42 --tab customers
//!   board-runner --ipc-mode            (JSON lines on stdin/stdout)
//!
//! IPC requests:
//!   {"type":"get_state"}
//!   {"type":"command","command":{"cmd":"set_query","query":"sar"}}
//!   {"type":"render","tab":"models"}
//!   {"type":"quit"}

use anyhow::Result;
use chrono::NaiveDate;
use churnboard_core::{
    command::ViewCommand,
    panel::{PanelReport, Tab},
    population::generate_population,
    provider::DashboardData,
    records::ChurnMetrics,
    session::DashboardSession,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Command {
        command: ViewCommand,
    },
    Render {
        tab: Tab,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = string_arg(&args, "--data-dir");
    let generate = parse_arg(&args, "--generate", 0usize);
    let seed = parse_arg(&args, "--seed", 42u64);

    let as_of = match string_arg(&args, "--as-of") {
        Some(s) => Some(NaiveDate::parse_from_str(&s, "%Y-%m-%d")?),
        None => None,
    };

    let mut session = build_session(data_dir.as_deref(), as_of, generate, seed)?;

    if ipc_mode {
        return run_ipc_loop(&mut session);
    }

    for command in commands_from_args(&args)? {
        session.apply(command)?;
    }
    let report = session.render(session.tab)?;
    print_report(&report);
    println!();
    println!(
        "  sorted by {} {}",
        session.view.sort_key.label(),
        session.view.sort_order.arrow(),
    );
    Ok(())
}

fn build_session(
    data_dir: Option<&str>,
    as_of: Option<NaiveDate>,
    generate: usize,
    seed: u64,
) -> Result<DashboardSession> {
    let mut session = match data_dir {
        Some(dir) => DashboardSession::load(dir)?,
        None => DashboardSession::sample(),
    };
    if as_of.is_some() {
        session.config.as_of = as_of;
    }
    if generate > 0 {
        let as_of = session.as_of();
        let thresholds = &session.config.risk_thresholds;
        let customers = generate_population(generate, seed, as_of, thresholds);
        let churn_metrics = ChurnMetrics::from_customers(&customers, thresholds);
        let data = DashboardData { customers, churn_metrics, ..session.data.clone() };
        session = DashboardSession::new(data, session.config.clone())?;
    }
    Ok(session)
}

fn commands_from_args(args: &[String]) -> Result<Vec<ViewCommand>> {
    let mut out = Vec::new();
    if let Some(tab) = string_arg(args, "--tab") {
        out.push(ViewCommand::SetTab { tab: tab.parse()? });
    }
    if let Some(query) = string_arg(args, "--query") {
        out.push(ViewCommand::SetQuery { query });
    }
    if let Some(key) = string_arg(args, "--sort") {
        out.push(ViewCommand::SortBy { key: key.parse()? });
    }
    if let Some(order) = string_arg(args, "--order") {
        out.push(ViewCommand::SetOrder { order: order.parse()? });
    }
    if let Some(level) = string_arg(args, "--risk") {
        let level = if level == "all" { None } else { Some(level.parse()?) };
        out.push(ViewCommand::SetRiskLevel { level });
    }
    if let Some(contract) = string_arg(args, "--contract") {
        let contract = if contract == "all" { None } else { Some(contract.parse()?) };
        out.push(ViewCommand::SetContractType { contract });
    }
    if let Some(segment) = string_arg(args, "--segment") {
        out.push(ViewCommand::SetSegment { segment: Some(segment) });
    }
    if let Some(range) = string_arg(args, "--range") {
        out.push(ViewCommand::SetDateRange { range: range.parse()? });
    }
    Ok(out)
}

fn run_ipc_loop(session: &mut DashboardSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("ipc: rejected request: {e}");
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&session.snapshot()?)?)?;
            }
            IpcRequest::Command { command } => match session.apply(command) {
                Ok(()) => writeln!(stdout, "{}", serde_json::to_string(&session.snapshot()?)?)?,
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
            IpcRequest::Render { tab } => {
                writeln!(stdout, "{}", serde_json::to_string(&session.render(tab)?)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_report(report: &PanelReport) {
    println!("=== {}: {} ===", report.tab.label(), report.title);
    for card in &report.cards {
        match &card.change {
            Some(change) => println!("  {:<22} {:>14}   ({change})", card.title, card.value),
            None => println!("  {:<22} {:>14}", card.title, card.value),
        }
    }
    for section in &report.sections {
        println!();
        println!("--- {} ---", section.heading);
        println!("  {}", section.columns.join(" | "));
        if section.rows.is_empty() {
            println!("  (no rows)");
        }
        for row in &section.rows {
            println!("  {}", row.join(" | "));
        }
    }
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
