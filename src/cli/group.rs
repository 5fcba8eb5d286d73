//
//  turso-cli
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group commands
//!
//! Groups are the placement unit for databases: every database in a group is
//! replicated to all of the group's locations.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{confirm_deletion, GlobalOptions};
use crate::api::{CreateGroupRequest, Group, GroupLocationRequest, GroupService};
use crate::output::{format_bool, format_list, print_field, print_header, OutputWriter, TableOutput, TableRow};

/// Manage groups
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// List groups in the organization
    #[command(visible_alias = "ls")]
    List,

    /// Show a group
    Get(NameArgs),

    /// Create a group
    Create(CreateArgs),

    /// Delete a group
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Add a location to a group
    #[command(name = "add-location")]
    AddLocation(LocationArgs),

    /// Remove a location from a group
    #[command(name = "remove-location")]
    RemoveLocation(LocationArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Group name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Group name
    pub name: String,

    /// Primary location, a three letter region code (e.g. lhr)
    #[arg(long, short = 'l')]
    pub location: String,

    /// SQLite extensions to enable ("all" or empty)
    #[arg(long, default_value = "")]
    pub extensions: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Group name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Group name
    pub name: String,

    /// Location code (e.g. ams)
    pub location: String,

    /// Reject location codes that are not three characters long
    #[arg(long)]
    pub strict: bool,
}

impl TableRow for Group {
    const HEADERS: &'static [&'static str] = &["NAME", "PRIMARY", "LOCATIONS", "VERSION", "ARCHIVED"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.primary.clone(),
            format_list(&self.locations),
            self.version.clone(),
            format_bool(self.archived, color),
        ]
    }
}

impl TableOutput for Group {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("Primary", &self.primary, color);
        print_field("Locations", &format_list(&self.locations), color);
        print_field("Version", &self.version, color);
        print_field("UUID", &self.uuid, color);
        print_field("Archived", &format_bool(self.archived, color), color);
    }
}

impl GroupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?.with_strict_locations(self.strict_locations());
        self.execute(&client, &global.output(), global).await
    }

    fn strict_locations(&self) -> bool {
        match &self.command {
            GroupSubcommand::AddLocation(args) | GroupSubcommand::RemoveLocation(args) => args.strict,
            _ => false,
        }
    }

    async fn execute<S>(&self, service: &S, output: &OutputWriter, global: &GlobalOptions) -> Result<()>
    where
        S: GroupService + ?Sized,
    {
        match &self.command {
            GroupSubcommand::List => {
                let response = service.list_groups().await?;
                output.write_list(&response.groups, "groups")
            }
            GroupSubcommand::Get(args) => {
                let response = service.get_group(&args.name).await?;
                output.write(&response.group)
            }
            GroupSubcommand::Create(args) => {
                let request = CreateGroupRequest::new(&args.name, &args.location)
                    .extensions(&args.extensions);
                let response = service.create_group(&request).await?;

                output.write_success(&format!(
                    "Created group {} in {}",
                    response.group.name, response.group.primary
                ));
                if output.is_json() {
                    output.write(&response.group)?;
                }
                Ok(())
            }
            GroupSubcommand::Delete(args) => {
                confirm_deletion(&format!("group {}", args.name), args.yes, global)?;
                let response = service.delete_group(&args.name).await?;

                output.write_success(&format!("Deleted group {}", response.group.name));
                if output.is_json() {
                    output.write(&response.group)?;
                }
                Ok(())
            }
            GroupSubcommand::AddLocation(args) => {
                let request = GroupLocationRequest::new(&args.name, &args.location);
                let response = service.add_location(&request).await?;

                output.write_success(&format!(
                    "Added {} to group {}",
                    args.location, response.group.name
                ));
                if output.is_json() {
                    output.write(&response.group)?;
                }
                Ok(())
            }
            GroupSubcommand::RemoveLocation(args) => {
                let request = GroupLocationRequest::new(&args.name, &args.location);
                let response = service.remove_location(&request).await?;

                output.write_success(&format!(
                    "Removed {} from group {}",
                    args.location, response.group.name
                ));
                if output.is_json() {
                    output.write(&response.group)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockGroupService, MockTransport};
    use crate::api::ApiError;
    use reqwest::StatusCode;

    fn cmd(command: GroupSubcommand) -> GroupCommand {
        GroupCommand { command }
    }

    #[tokio::test]
    async fn test_group_commands_against_mock_service() {
        let service = MockGroupService::default();
        let output = OutputWriter::json();
        let global = GlobalOptions::default();

        let commands = [
            GroupSubcommand::List,
            GroupSubcommand::Get(NameArgs { name: "meow".into() }),
            GroupSubcommand::Create(CreateArgs {
                name: "meow".into(),
                location: "lhr".into(),
                extensions: String::new(),
            }),
            GroupSubcommand::Delete(DeleteArgs {
                name: "woof".into(),
                yes: true,
            }),
            GroupSubcommand::AddLocation(LocationArgs {
                name: "meow".into(),
                location: "ams".into(),
                strict: false,
            }),
        ];

        for command in commands {
            cmd(command).execute(&service, &output, &global).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_group_get_not_found() {
        let service = MockGroupService::failing(StatusCode::NOT_FOUND);
        let err = cmd(GroupSubcommand::Get(NameArgs { name: "nope".into() }))
            .execute(&service, &OutputWriter::table(), &GlobalOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "error getting group: 404");
    }

    #[tokio::test]
    async fn test_group_delete_requires_confirmation() {
        let transport = MockTransport::new();
        let client = transport.client().unwrap();
        let global = GlobalOptions {
            no_prompt: true,
            ..Default::default()
        };

        let result = cmd(GroupSubcommand::Delete(DeleteArgs {
            name: "meow".into(),
            yes: false,
        }))
        .execute(&client, &OutputWriter::table(), &global)
        .await;
        assert!(result.is_err());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_group_create_invalid_location_is_rejected_locally() {
        let transport = MockTransport::new();
        let client = transport.client().unwrap();

        let err = cmd(GroupSubcommand::Create(CreateArgs {
            name: "meow".into(),
            location: "london".into(),
            extensions: String::new(),
        }))
        .execute(&client, &OutputWriter::table(), &GlobalOptions::default())
        .await
        .unwrap_err();

        assert!(err.downcast_ref::<ApiError>().is_some_and(ApiError::is_validation));
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_strict_flag_only_for_location_commands() {
        let add = cmd(GroupSubcommand::AddLocation(LocationArgs {
            name: "meow".into(),
            location: "ams".into(),
            strict: true,
        }));
        assert!(add.strict_locations());
        assert!(!cmd(GroupSubcommand::List).strict_locations());
    }

    #[test]
    fn test_group_row() {
        let group = MockGroupService::default().list_groups_response.groups[0].clone();
        assert_eq!(group.row(false), vec!["meow", "lhr", "lhr, ams, bos", "v0.23.7", "No"]);
    }
}
