//! CLI runner - executes commands

use crate::auth::Credentials;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::Client;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::domain::{validate_list_annotations_params, PollOptions, UploadFile};
use crate::error::{Error, Result};
use crate::models::{deserialize_default, NodeRef, Schema};
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::{ExportFormat, JsonValue, Method};
use futures::TryStreamExt;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.client_config()?;
        debug!(base_url = %config.base_url, "Using API");
        let client = Client::new(&config)?;

        match &self.cli.command {
            Commands::Login => self.login(&client).await,
            Commands::List {
                resource,
                filters,
                ordering,
                sideload,
                content_schema_id,
                max_records,
            } => {
                let mut query = build_query(filters);
                query.ordering.clone_from(ordering);
                query.sideloads.clone_from(sideload);
                query.content_schema_ids.clone_from(content_schema_id);
                self.list(&client, resource, query, *max_records).await
            }
            Commands::Get { resource, id } => self.get(&client, resource, *id).await,
            Commands::Upload {
                queue,
                files,
                wait,
                timeout_s,
            } => {
                self.upload(&client, *queue, files, *wait, *timeout_s)
                    .await
            }
            Commands::Export {
                queue,
                format,
                filters,
                output,
            } => {
                let format: ExportFormat = format.parse()?;
                self.export(&client, *queue, format, build_query(filters), output.as_deref())
                    .await
            }
            Commands::SchemaTree {
                schema_id,
                include_buttons,
            } => {
                let schema = client.retrieve_schema(*schema_id).await?;
                for line in schema_tree_lines(&schema, !include_buttons) {
                    self.output_message(&line)?;
                }
                Ok(())
            }
            Commands::OwnOrganization => {
                let organization = client.retrieve_own_organization().await?;
                self.output_message(&serde_json::to_value(organization)?)
            }
        }
    }

    /// Resolve the client configuration from the config file and the
    /// credential flags. Flags override values of the file.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let from_file = match &self.cli.config {
            Some(path) => Some(ClientConfig::from_file(path)?),
            None => None,
        };

        let credentials = match (&self.cli.token, &self.cli.username, &self.cli.password) {
            (Some(token), _, _) => Some(Credentials::token(token.clone())),
            (None, Some(username), Some(password)) => {
                Some(Credentials::user(username.clone(), password.clone()))
            }
            (None, Some(_), None) => return Err(Error::missing_field("password")),
            _ => None,
        };

        let mut config = match (from_file, credentials) {
            (Some(mut config), credentials) => {
                if let Some(credentials) = credentials {
                    config.credentials = credentials;
                }
                config
            }
            (None, Some(credentials)) => ClientConfig::new(DEFAULT_BASE_URL, credentials),
            (None, None) => {
                return Err(Error::config(
                    "no credentials: use --token, --username/--password or --config",
                ))
            }
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        config.validate()?;
        Ok(config)
    }

    /// Print the API token
    async fn login(&self, client: &Client) -> Result<()> {
        let token = client.get_token(false).await?;
        self.output_message(&json!({ "token": token }))
    }

    /// Print every object of a resource
    async fn list(
        &self,
        client: &Client,
        resource: &str,
        query: ListQuery,
        max_records: Option<usize>,
    ) -> Result<()> {
        let resource = parse_resource(resource)?;
        if resource == Resource::Annotation {
            validate_list_annotations_params(&query.sideloads, &query.content_schema_ids)?;
        }

        let mut records = client.request_paginated(resource.path(), query, Method::GET, None);
        let mut count = 0usize;
        while let Some(record) = records.try_next().await? {
            let object = deserialize_default(resource, JsonValue::Object(record))?;
            self.output_message(&object.to_json()?)?;

            count += 1;
            if max_records.is_some_and(|max| count >= max) {
                break;
            }
        }

        info!(resource = %resource, count, "Listed records");
        Ok(())
    }

    /// Print one object
    async fn get(&self, client: &Client, resource: &str, id: i64) -> Result<()> {
        let resource = parse_resource(resource)?;
        let value = match resource {
            Resource::Task => serde_json::to_value(client.retrieve_task(id).await?)?,
            Resource::Annotation => serde_json::to_value(client.retrieve_annotation(id, &[]).await?)?,
            _ => {
                let record = client.http().fetch_one(resource, id).await?;
                deserialize_default(resource, JsonValue::Object(record))?.to_json()?
            }
        };
        self.output_message(&value)
    }

    /// Upload files and print the created tasks
    async fn upload(
        &self,
        client: &Client,
        queue_id: i64,
        files: &[PathBuf],
        wait: bool,
        timeout_s: Option<u64>,
    ) -> Result<()> {
        let files: Vec<UploadFile> = files.iter().map(UploadFile::from_path).collect();
        let tasks = client.upload_document(queue_id, &files, None, None).await?;
        info!(queue_id, count = tasks.len(), "Uploaded documents");

        let mut options = PollOptions::new();
        if let Some(seconds) = timeout_s {
            options = options.timeout(Duration::from_secs(seconds));
        }

        for task in tasks {
            let task = if wait {
                client.poll_task_until_succeeded(task.id, &options).await?
            } else {
                task
            };
            self.output_message(&serde_json::to_value(task)?)?;
        }
        Ok(())
    }

    /// Stream an export to stdout or a file
    async fn export(
        &self,
        client: &Client,
        queue_id: i64,
        format: ExportFormat,
        query: ListQuery,
        output: Option<&Path>,
    ) -> Result<()> {
        if format == ExportFormat::Json && output.is_none() {
            let mut annotations = client.export_annotations_to_json(queue_id, query);
            while let Some(annotation) = annotations.try_next().await? {
                self.output_message(&serde_json::to_value(annotation)?)?;
            }
            return Ok(());
        }

        let mut chunks = client
            .export_annotations_to_file(queue_id, format, query)
            .await?;
        let mut written = 0usize;
        match output {
            Some(path) => {
                let mut file = tokio::fs::File::create(path).await?;
                while let Some(chunk) = chunks.try_next().await? {
                    written += chunk.len();
                    file.write_all(&chunk).await?;
                }
                file.flush().await?;
                info!(path = %path.display(), bytes = written, "Export written");
            }
            None => {
                let mut stdout = tokio::io::stdout();
                while let Some(chunk) = chunks.try_next().await? {
                    written += chunk.len();
                    stdout.write_all(&chunk).await?;
                }
                stdout.flush().await?;
                debug!(bytes = written, "Export written to stdout");
            }
        }
        Ok(())
    }

    fn output_message(&self, msg: &JsonValue) -> Result<()> {
        let line = match self.cli.output_format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{line}");
        Ok(())
    }
}

fn parse_resource(name: &str) -> Result<Resource> {
    Resource::from_name(name)
        .ok_or_else(|| Error::invalid_params(format!("unknown resource: {name}")))
}

fn build_query(filters: &[(String, String)]) -> ListQuery {
    filters
        .iter()
        .fold(ListQuery::new(), |query, (key, value)| {
            query.filter(key.clone(), value.clone())
        })
}

/// One JSON line per schema node: sections first, each followed by its
/// nodes in depth-first order
pub fn schema_tree_lines(schema: &Schema, ignore_buttons: bool) -> Vec<JsonValue> {
    let mut lines = Vec::new();
    for section in &schema.content {
        lines.push(json!({
            "id": section.id,
            "category": "section",
            "label": section.label,
            "parent": null,
        }));

        for node in section.traverse(ignore_buttons) {
            let parent = schema.parent_of(node.id()).map(|p| p.id());
            let (category, label, datapoint_type) = match node {
                NodeRef::Datapoint(dp) => ("datapoint", dp.label.as_deref(), dp.datapoint_type),
                NodeRef::Multivalue(mv) => ("multivalue", mv.label.as_deref(), None),
                NodeRef::Tuple(tuple) => ("tuple", tuple.label.as_deref(), None),
            };
            lines.push(json!({
                "id": node.id(),
                "category": category,
                "type": datapoint_type,
                "label": label,
                "parent": parent,
            }));
        }
    }
    lines
}
