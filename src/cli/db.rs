//
//  turso-cli
//  cli/db.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Database commands
//!
//! This module provides database management functionality including:
//! - Listing databases in the organization
//! - Viewing database details
//! - Creating and deleting databases
//! - Minting database tokens (`turso db token create`)

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{confirm_deletion, GlobalOptions};
use crate::api::{
    CreateDatabaseRequest, CreateDatabaseTokenRequest, CreateDatabaseTokenResponse, CreatedDatabase,
    Database, DatabaseService, DatabaseTokenService, DEFAULT_EXPIRATION, FULL_ACCESS, READ_ONLY,
};
use crate::output::{format_bool, format_list, print_field, print_header, OutputWriter, TableOutput, TableRow};

/// Manage databases
#[derive(Args, Debug)]
pub struct DbCommand {
    #[command(subcommand)]
    pub command: DbSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DbSubcommand {
    /// List databases in the organization
    #[command(visible_alias = "ls")]
    List,

    /// Show a database
    #[command(visible_alias = "show")]
    Get(NameArgs),

    /// Create a database
    Create(CreateArgs),

    /// Delete a database
    #[command(visible_alias = "destroy")]
    Delete(DeleteArgs),

    /// Manage database tokens
    Token(TokenCommand),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Database name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Database name: lowercase letters, numbers and dashes, at most 32 characters
    pub name: String,

    /// Group to create the database in
    #[arg(long, short = 'g', default_value = "")]
    pub group: String,

    /// Create the database as a schema database
    #[arg(long)]
    pub schema: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Database name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Manage database tokens
#[derive(Args, Debug)]
pub struct TokenCommand {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenSubcommand {
    /// Create a token for a database
    Create(TokenCreateArgs),
}

#[derive(Args, Debug)]
pub struct TokenCreateArgs {
    /// Database name
    pub name: String,

    /// Token lifetime: "never" or a duration such as 1h30m, 7d, 12w
    #[arg(long, short = 'e', default_value = DEFAULT_EXPIRATION)]
    pub expiration: String,

    /// Access level
    #[arg(long, short = 'a', default_value = FULL_ACCESS, value_parser = [FULL_ACCESS, READ_ONLY])]
    pub authorization: String,

    /// Grant read access to other databases through ATTACH (repeatable or comma separated)
    #[arg(long = "attach", value_name = "DATABASE", value_delimiter = ',')]
    pub attach: Vec<String>,
}

impl TableRow for Database {
    const HEADERS: &'static [&'static str] = &["NAME", "GROUP", "PRIMARY", "HOSTNAME", "SCHEMA"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.group.clone(),
            self.primary_region.clone(),
            self.host().unwrap_or("-").to_string(),
            format_bool(self.is_schema, color),
        ]
    }
}

impl TableOutput for Database {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("ID", &self.id, color);
        print_field("Hostname", self.host().unwrap_or("-"), color);
        print_field("Group", &self.group, color);
        print_field("Primary region", &self.primary_region, color);
        print_field("Regions", &format_list(&self.regions), color);
        print_field("Version", &self.version, color);

        println!();
        print_field("Schema database", &format_bool(self.is_schema, color), color);
        if let Some(schema) = &self.schema {
            print_field("Parent schema", schema, color);
        }
        print_field("Allow attach", &format_bool(self.allow_attach, color), color);
        print_field("Reads blocked", &format_bool(self.block_reads, color), color);
        print_field("Writes blocked", &format_bool(self.block_writes, color), color);
        print_field("Sleeping", &format_bool(self.sleeping, color), color);
    }
}

impl TableOutput for CreatedDatabase {
    fn print_table(&self, color: bool) {
        print_field("Name", &self.name, color);
        print_field("ID", &self.id, color);
        print_field("Hostname", self.host().unwrap_or("-"), color);
    }
}

impl TableOutput for CreateDatabaseTokenResponse {
    fn print_table(&self, _color: bool) {
        println!("{}", self.jwt);
    }
}

impl DbCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        self.execute(&client, &client, &global.output(), global).await
    }

    async fn execute<D, T>(
        &self,
        databases: &D,
        tokens: &T,
        output: &OutputWriter,
        global: &GlobalOptions,
    ) -> Result<()>
    where
        D: DatabaseService + ?Sized,
        T: DatabaseTokenService + ?Sized,
    {
        match &self.command {
            DbSubcommand::List => {
                let response = databases.list_databases().await?;
                output.write_list(&response.databases, "databases")
            }
            DbSubcommand::Get(args) => {
                let response = databases.get_database(&args.name).await?;
                output.write(&response.database)
            }
            DbSubcommand::Create(args) => {
                let request = CreateDatabaseRequest::new(&args.name)
                    .group(&args.group)
                    .schema(args.schema);
                let response = databases.create_database(&request).await?;

                output.write_success(&format!("Created database {}", response.database.name));
                output.write(&response.database)
            }
            DbSubcommand::Delete(args) => {
                confirm_deletion(&format!("database {}", args.name), args.yes, global)?;
                let response = databases.delete_database(&args.name).await?;

                output.write_success(&format!("Deleted database {}", response.database));
                if output.is_json() {
                    crate::output::write_json(&response)?;
                }
                Ok(())
            }
            DbSubcommand::Token(cmd) => match &cmd.command {
                TokenSubcommand::Create(args) => {
                    let request = CreateDatabaseTokenRequest::new(&args.name)
                        .expiration(&args.expiration)
                        .authorization(&args.authorization)
                        .read_attach(args.attach.clone());
                    let response = tokens.create_database_token(&request).await?;
                    output.write(&response)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockDatabaseService, MockDatabaseTokenService, MockTransport};
    use crate::api::ApiError;
    use clap::Parser;
    use reqwest::StatusCode;

    fn cmd(command: DbSubcommand) -> DbCommand {
        DbCommand { command }
    }

    fn token_args(name: &str) -> TokenCreateArgs {
        TokenCreateArgs {
            name: name.to_string(),
            expiration: DEFAULT_EXPIRATION.to_string(),
            authorization: FULL_ACCESS.to_string(),
            attach: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_db_commands_against_mock_services() {
        let databases = MockDatabaseService::default();
        let tokens = MockDatabaseTokenService::default();
        let output = OutputWriter::json();
        let global = GlobalOptions::default();

        let commands = [
            DbSubcommand::List,
            DbSubcommand::Get(NameArgs { name: "my-db".into() }),
            DbSubcommand::Create(CreateArgs {
                name: "my-db".into(),
                group: "default".into(),
                schema: false,
            }),
            DbSubcommand::Delete(DeleteArgs {
                name: "my-db".into(),
                yes: true,
            }),
            DbSubcommand::Token(TokenCommand {
                command: TokenSubcommand::Create(token_args("my-db")),
            }),
        ];

        for command in commands {
            cmd(command)
                .execute(&databases, &tokens, &output, &global)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_db_create_invalid_name_sends_nothing() {
        let transport = MockTransport::new();
        let client = transport.client().unwrap();

        let err = cmd(DbSubcommand::Create(CreateArgs {
            name: "myAWESOMEdb".into(),
            group: String::new(),
            schema: false,
        }))
        .execute(&client, &client, &OutputWriter::table(), &GlobalOptions::default())
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::InvalidDatabaseName)
        ));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_db_token_create_sends_attach_permissions() {
        let transport = MockTransport::with_response(StatusCode::OK, r#"{"jwt": "abc"}"#);
        let client = transport.client().unwrap();

        let mut args = token_args("my-db");
        args.expiration = "7d".into();
        args.authorization = READ_ONLY.into();
        args.attach = vec!["shared".into()];

        cmd(DbSubcommand::Token(TokenCommand {
            command: TokenSubcommand::Create(args),
        }))
        .execute(&client, &client, &OutputWriter::json(), &GlobalOptions::default())
        .await
        .unwrap();

        let sent = &transport.requests()[0];
        assert!(sent.url.ends_with("/databases/my-db/auth/tokens?expiration=7d&authorization=read-only"));
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["permissions"]["read_attach"]["database"][0], "shared");
    }

    #[tokio::test]
    async fn test_db_list_failure() {
        let databases = MockDatabaseService::failing(StatusCode::FORBIDDEN);
        let err = cmd(DbSubcommand::List)
            .execute(
                &databases,
                &MockDatabaseTokenService::default(),
                &OutputWriter::table(),
                &GlobalOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "error listing databases: 403");
    }

    #[test]
    fn test_token_create_parsing() {
        let cli = crate::Cli::try_parse_from([
            "turso", "db", "token", "create", "my-db", "-e", "12w", "--attach", "a,b", "--attach", "c",
        ])
        .unwrap();

        let crate::cli::Commands::Db(DbCommand {
            command: DbSubcommand::Token(TokenCommand {
                command: TokenSubcommand::Create(args),
            }),
        }) = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(args.expiration, "12w");
        assert_eq!(args.authorization, FULL_ACCESS);
        assert_eq!(args.attach, vec!["a", "b", "c"]);

        assert!(crate::Cli::try_parse_from([
            "turso", "db", "token", "create", "my-db", "--authorization", "admin",
        ])
        .is_err());
    }

    #[test]
    fn test_database_row() {
        let db = MockDatabaseService::default().get_database_response.database;
        let row = db.row(false);
        assert_eq!(row[0], "my-db");
        assert_eq!(row[3], "[databaseName]-[organizationName].turso.io");
    }
}
