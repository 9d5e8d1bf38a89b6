//! Ticket adapter - Jira-compatible REST client

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::{CapabilityError, CapabilityResult};
use crate::domain::entities::Ticket;
use crate::domain::traits::TicketCapability;
use crate::infrastructure::config::TicketConfig;

const ISSUE_FIELDS: &str = "summary,description,status,created";
/// Jira timestamp format, e.g. `2024-01-15T10:30:00.000+0000`
const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Jira REST v2 client
pub struct JiraTickets {
    client: Client,
    base_url: String,
    project_key: String,
    issue_type: String,
    email: String,
    api_token: String,
}

#[derive(Serialize)]
struct CreateIssue<'a> {
    fields: CreateFields<'a>,
}

#[derive(Serialize)]
struct CreateFields<'a> {
    project: KeyRef<'a>,
    summary: &'a str,
    description: &'a str,
    issuetype: NameRef<'a>,
}

#[derive(Serialize)]
struct KeyRef<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct NameRef<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

#[derive(Debug, Deserialize)]
struct Issue {
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    summary: Option<String>,
    description: Option<String>,
    status: Option<IssueStatus>,
    created: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueStatus {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    issues: Vec<Issue>,
}

/// Quote a value for use inside a JQL string literal
fn jql_quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

impl JiraTickets {
    pub fn new(config: &TicketConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_key: config.project_key.clone(),
            issue_type: config.issue_type.clone(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url, path)
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }

    fn search_jql(&self, query: &str) -> String {
        format!(
            "project = {} AND text ~ {} ORDER BY created DESC",
            jql_quote(&self.project_key),
            jql_quote(query)
        )
    }

    fn to_ticket(&self, issue: Issue) -> Ticket {
        let mut ticket = Ticket::new(&issue.key, issue.fields.summary.unwrap_or_default())
            .with_description(issue.fields.description.unwrap_or_default())
            .with_url(self.browse_url(&issue.key));
        if let Some(status) = issue.fields.status {
            ticket = ticket.with_status(status.name);
        }
        if let Some(created) = issue
            .fields
            .created
            .as_deref()
            .and_then(|c| DateTime::<FixedOffset>::parse_from_str(c, CREATED_FORMAT).ok())
        {
            ticket = ticket.with_created(created);
        }
        ticket
    }

    async fn check(response: reqwest::Response, action: &str) -> CapabilityResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CapabilityError::http_status(
            status.as_u16(),
            format!("jira {} returned {}: {}", action, status, body),
        ))
    }
}

#[async_trait]
impl TicketCapability for JiraTickets {
    async fn create(&self, title: &str, description: &str) -> CapabilityResult<Ticket> {
        let request = CreateIssue {
            fields: CreateFields {
                project: KeyRef { key: &self.project_key },
                summary: title,
                description,
                issuetype: NameRef { name: &self.issue_type },
            },
        };

        let response = self.client
            .post(self.rest_url("issue"))
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&request)
            .send()
            .await?;
        let created: CreatedIssue = Self::check(response, "create").await?.json().await?;

        Ok(Ticket::new(&created.key, title)
            .with_description(description)
            .with_url(self.browse_url(&created.key)))
    }

    async fn get(&self, key: &str) -> CapabilityResult<Option<Ticket>> {
        let response = self.client
            .get(self.rest_url(&format!("issue/{}", key)))
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[("fields", ISSUE_FIELDS)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let issue: Issue = Self::check(response, "get").await?.json().await?;
        Ok(Some(self.to_ticket(issue)))
    }

    async fn search(&self, query: &str, limit: usize) -> CapabilityResult<Vec<Ticket>> {
        let jql = self.search_jql(query);
        let max_results = limit.to_string();

        let response = self.client
            .get(self.rest_url("search"))
            .basic_auth(&self.email, Some(&self.api_token))
            .query(&[
                ("jql", jql.as_str()),
                ("maxResults", max_results.as_str()),
                ("fields", ISSUE_FIELDS),
            ])
            .send()
            .await?;

        let result: SearchResult = Self::check(response, "search").await?.json().await?;
        Ok(result.issues.into_iter().map(|issue| self.to_ticket(issue)).collect())
    }
}
