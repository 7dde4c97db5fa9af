use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "eventzen", about = "Budgets and reports for EventZen events")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the budget service URL (e.g. http://localhost:8083/api).
    #[arg(long, global = true)]
    pub budget_api_url: Option<String>,
    /// Override the event service URL (e.g. http://localhost:8081/api).
    #[arg(long, global = true)]
    pub event_api_url: Option<String>,
    /// Bearer token sent with every request.
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub level: Option<String>,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List budgets, one page at a time.
    Budgets(BudgetsArgs),
    /// Show a budget with its summary report.
    Budget { id: i64 },
    /// Delete a budget.
    BudgetDelete { id: String },
    /// List the expenses of a budget.
    Expenses(TransactionArgs),
    /// List the incomes of a budget.
    Incomes(TransactionArgs),
    /// List events.
    Events(EventsArgs),
}

#[derive(Debug, Args)]
pub struct BudgetsArgs {
    /// 0-based page index.
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    /// Page size, defaults to the configured `page_size`.
    #[arg(long)]
    pub size: Option<u32>,
    /// Skip the budget list cache.
    #[arg(long)]
    pub refresh: bool,
    /// Keep budgets whose name or event name contains this text.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct TransactionArgs {
    pub budget_id: i64,
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = client::DEFAULT_TRANSACTION_PAGE_SIZE)]
    pub size: u32,
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long)]
    pub size: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_budget_listing() {
        let cli = Cli::try_parse_from([
            "eventzen", "budgets", "--page", "2", "--refresh", "--search", "gala", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Command::Budgets(args) = cli.command else {
            panic!("expected budgets");
        };
        assert_eq!(args.page, 2);
        assert_eq!(args.size, None);
        assert!(args.refresh);
        assert_eq!(args.search.as_deref(), Some("gala"));
    }

    #[test]
    fn delete_takes_raw_id() {
        let cli = Cli::try_parse_from(["eventzen", "budget-delete", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::BudgetDelete { id } if id == "abc"));
    }

    #[test]
    fn transaction_listing_defaults() {
        let cli = Cli::try_parse_from(["eventzen", "--token", "t", "expenses", "4"]).unwrap();
        assert_eq!(cli.token.as_deref(), Some("t"));
        let Command::Expenses(args) = cli.command else {
            panic!("expected expenses");
        };
        assert_eq!(args.budget_id, 4);
        assert_eq!(args.page, 0);
        assert_eq!(args.size, 20);
    }

    #[test]
    fn budget_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["eventzen", "budget", "x"]).is_err());
    }
}
