use clap::Parser;

use std::path::PathBuf;

use super::constants::ENV_CONFIG;
use crate::sql::Backend;

#[derive(Parser, Debug)]
#[command(name = "rqp")]
#[command(
    version,
    about = "Render query-string filters as SQL clauses and document predicates",
    long_about = None
)]
pub struct Cli {
    /// Field declarator, `field` or `field:type` (repeatable)
    #[arg(long = "declare", short = 'd', value_name = "DECLARATOR")]
    pub declarations: Vec<String>,

    /// List value delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Field name that `mongoid` fields are rewritten to
    #[arg(long)]
    pub identity_field: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Placeholder style of the printed SQL (sqlite, mysql, postgres)
    #[arg(long, short = 'b', default_value = "sqlite")]
    pub backend: Backend,

    /// Print one JSON object per filter
    #[arg(long)]
    pub json: bool,

    /// `key=value` tokens, e.g. `id[in]=1,2,3`
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,
}
