//
//  turso-cli
//  cli/org.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::{Organization, OrganizationService};
use crate::output::{format_bool, OutputWriter, TableRow};

/// Manage organizations
#[derive(Args, Debug)]
pub struct OrgCommand {
    #[command(subcommand)]
    pub command: OrgSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrgSubcommand {
    /// List organizations you belong to
    #[command(visible_alias = "ls")]
    List,
}

impl TableRow for Organization {
    const HEADERS: &'static [&'static str] = &["NAME", "SLUG", "TYPE", "PLAN", "OVERAGES"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.slug.clone(),
            self.kind.clone(),
            self.plan_id.clone(),
            format_bool(self.overages, color),
        ]
    }
}

impl OrgCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        self.execute(&client, &global.output()).await
    }

    async fn execute<S>(&self, service: &S, output: &OutputWriter) -> Result<()>
    where
        S: OrganizationService + ?Sized,
    {
        match &self.command {
            OrgSubcommand::List => {
                let orgs = service.list_organizations().await?;
                output.write_list(&orgs, "organizations")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockOrganizationService;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_org_list() {
        let cmd = OrgCommand {
            command: OrgSubcommand::List,
        };
        cmd.execute(&MockOrganizationService::default(), &OutputWriter::json())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_org_list_failure() {
        let cmd = OrgCommand {
            command: OrgSubcommand::List,
        };
        let service = MockOrganizationService {
            failure: Some(StatusCode::UNAUTHORIZED),
            ..Default::default()
        };
        let err = cmd.execute(&service, &OutputWriter::table()).await.unwrap_err();
        assert_eq!(err.to_string(), "error listing organizations: 401");
    }

    #[test]
    fn test_org_row() {
        let row = MockOrganizationService::default().list_organizations_response[0].row(false);
        assert_eq!(row[0], "meow");
        assert_eq!(row[4], "No");
    }
}
