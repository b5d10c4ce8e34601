//! Command-line application: renders each `key=value` token it is given

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::json;

use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::{Cli, FilterConfig};
use crate::filters::{Filter, FilterParser, SqlParams, Validations};
use crate::sql::Backend;

/// Rendered output of one filter
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub args: Vec<String>,
    pub document: serde_json::Value,
}

pub struct CoreApp {
    parser: FilterParser,
    backend: Backend,
    json: bool,
}

impl CoreApp {
    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        Self::init_logging();

        let app = Self::from_cli(&cli)?;
        let failures = cli
            .pairs
            .iter()
            .filter(|pair| !app.print(pair))
            .count();

        if failures > 0 {
            bail!("{} of {} filters failed", failures, cli.pairs.len());
        }
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => FilterConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => FilterConfig::default(),
        };
        let mut config = base
            .with_overrides(|name| std::env::var(name).ok())
            .context("Invalid environment overrides")?;

        if let Some(delimiter) = cli.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(identity_field) = &cli.identity_field {
            config.identity_field = identity_field.clone();
        }

        let validations = Validations::from_declarations(
            cli.declarations.iter().map(|d| (d.as_str(), None)),
        )
        .context("Invalid field declaration")?;

        let parser = FilterParser::new(config, validations).context("Invalid configuration")?;

        Ok(Self {
            parser,
            backend: cli.backend,
            json: cli.json,
        })
    }

    /// Parse and render one `key=value` token
    pub fn render(&self, pair: &str) -> Result<Rendered> {
        let filter = self.parser.parse_pair(pair)?;
        self.render_filter(&filter)
    }

    fn render_filter(&self, filter: &Filter) -> Result<Rendered> {
        let mut params = SqlParams::default();
        let sql = filter.to_sql_with(&mut params, self.backend.dialect())?;
        let args = params.values.iter().map(ToString::to_string).collect();
        let (name, predicate) = filter.document_entry()?;

        Ok(Rendered {
            sql,
            args,
            document: json!({ name: predicate }),
        })
    }

    /// Print the rendering of `pair`; returns false when it failed
    fn print(&self, pair: &str) -> bool {
        match self.render(pair) {
            Ok(rendered) if self.json => {
                let line = json!({
                    "input": pair,
                    "sql": rendered.sql,
                    "args": rendered.args,
                    "document": rendered.document,
                });
                println!("{}", line);
                true
            }
            Ok(rendered) => {
                println!("{}", pair);
                println!("  sql:      {}", rendered.sql);
                println!("  args:     [{}]", rendered.args.join(", "));
                println!("  document: {}", rendered.document);
                true
            }
            Err(e) => {
                tracing::warn!(input = pair, error = %e, "Filter rejected");
                if self.json {
                    println!("{}", json!({ "input": pair, "error": e.to_string() }));
                } else {
                    println!("{}\n  error:    {}", pair, e);
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(args: &[&str]) -> CoreApp {
        let argv = std::iter::once("rqp").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        CoreApp::from_cli(&cli).unwrap()
    }

    #[test]
    fn test_render_postgres() {
        let app = app(&["-d", "id:int", "-b", "postgres", "id[in]=5,6,7"]);
        let rendered = app.render("id[in]=5,6,7").unwrap();

        assert_eq!(rendered.sql, "id IN ($1,$2,$3)");
        assert_eq!(rendered.args, vec!["5", "6", "7"]);
        assert_eq!(rendered.document, json!({ "id": { "$in": [5, 6, 7] } }));
    }

    #[test]
    fn test_render_rejects_undeclared() {
        let app = app(&["-d", "id:int", "x=1"]);
        let err = app.render("x=1").unwrap_err();
        assert!(err.to_string().contains("validation not found"));
    }

    #[test]
    fn test_cli_overrides_delimiter() {
        let app = app(&["-d", "s", "--delimiter", ";", "s[in]=a;b"]);
        let rendered = app.render("s[in]=a;b").unwrap();
        assert_eq!(rendered.sql, "s IN (?,?)");
        assert_eq!(rendered.args, vec!["a", "b"]);
    }
}
