use chrono::Local;
use sms_ledger_rs::{
    Classifier, EntryForm, EntryType, Ledger, PipelineSettings, StaticSource, export_csv,
    sync_sources,
};
use std::env;
use tracing_subscriber::EnvFilter;

const SAMPLE_SMS: &str = r#"[
    {"_id": "101", "address": "VM-HDFCBK", "body": "Your account credited INR 1,200.50 on 18-10", "date": "1760781600000"},
    {"_id": "102", "address": "AX-SBICRD", "body": "You spent Rs 45 at store", "date": "1760778000000"},
    {"_id": "103", "address": "Friend", "body": "Meeting at 5pm", "date": "1760774400000"}
]"#;

const SAMPLE_CALLS: &str = r#"[
    {"number": "+911234567890", "type": "3", "date": "1760781000000", "duration": "0"}
]"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Usage: sync_ledger [sms.json] [budget]
    let args: Vec<String> = env::args().collect();

    let rows = match args.get(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            println!("Using built-in sample SMS rows\n");
            SAMPLE_SMS.to_string()
        }
    };
    let budget = args.get(2).map(String::as_str).unwrap_or("2000");

    let settings = PipelineSettings::default();
    let source = StaticSource::from_json(&rows)?.with_call_logs_json(SAMPLE_CALLS)?;
    let classifier = Classifier::new(settings.rules.clone());

    let report = sync_sources(&source, &source, Some(200), &classifier, settings.timeout(), None).await;
    for error in report.errors() {
        println!("warning: {}", error);
    }

    let mut ledger = Ledger::new(settings.merge_policy);
    ledger.add_entry(
        EntryForm::new("Transport", "200")
            .description("auto fare")
            .into_entry(EntryType::Expense, "manual-1", Local::now().date_naive())?,
    );

    if let Ok(transactions) = report.transactions {
        let added = ledger.merge_classified(transactions);
        println!("Merged {} SMS transactions", added);
    }
    if let Ok(calls) = &report.call_logs {
        println!("Fetched {} call log rows", calls.len());
    }

    let totals = ledger.totals();
    println!();
    for entry in ledger.entries() {
        let sign = match entry.entry_type {
            EntryType::Income => '+',
            EntryType::Expense => '-',
        };
        println!("  {} {:<12} {}{}", entry.date, entry.category, sign, entry.amount);
    }
    println!();
    println!("Total income:  {}", totals.total_income);
    println!("Total expense: {}", totals.total_expense);
    println!("Budget used:   {:.1}%", ledger.percentage_spent(budget));
    println!();
    print!("{}", export_csv(ledger.entries())?);

    Ok(())
}
