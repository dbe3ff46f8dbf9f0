use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Print the tokens of a filter string
    Tokens {
        #[arg(long, help = "Filter string, e.g. 'eq:id:1 & like:name:ann'")]
        filter: String,
    },
    /// Print the evaluation tree of a filter string
    Tree {
        #[arg(long, help = "Filter string")]
        filter: String,

        #[arg(long, help = "Maximum nesting depth of the tree")]
        max_depth: Option<usize>,

        #[arg(long, help = "Print the tree as JSON instead of a bracketed expression")]
        json: bool,
    },
    /// Compile filter and sort parameters against a field registry
    Compile {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long, help = "Print the compiled query as JSON")]
        json: bool,
    },
    /// Render the SELECT statement for filter and sort parameters
    Sql {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long, help = "Table to select from")]
        table: String,

        #[arg(long, help = "Table alias used by the registry columns")]
        alias: Option<String>,

        #[arg(long, default_value = "postgres", help = "SQL dialect: postgres or mysql")]
        dialect: String,

        #[arg(long, help = "One-based page number")]
        page: Option<u64>,

        #[arg(long, help = "Rows per page")]
        per_page: Option<u64>,

        #[arg(long, help = "Render the COUNT(*) statement instead of the row query")]
        count: bool,
    },
}

#[derive(Args)]
pub struct QueryArgs {
    #[arg(long, help = "Registry definition file (JSON)")]
    pub registry: String,

    #[arg(long, help = "Filter string")]
    pub filter: Option<String>,

    #[arg(long, help = "Sort string, e.g. 'name:desc'")]
    pub sort: Option<String>,
}
