//! Builders for test configs and request payloads.

#![allow(dead_code)]

use requisition::model::{RequestAction, RequestPayload};

/// Builds config JSON documents.
pub struct ConfigBuilder {
    version: String,
    listen: Option<String>,
    database_path: Option<String>,
    page_size: Option<i64>,
    signatory_people: Option<Vec<String>>,
    base_url: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            listen: None,
            database_path: None,
            page_size: None,
            signatory_people: None,
            base_url: None,
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn listen(mut self, addr: &str) -> Self {
        self.listen = Some(addr.to_string());
        self
    }

    pub fn database_path(mut self, path: &str) -> Self {
        self.database_path = Some(path.to_string());
        self
    }

    pub fn page_size(mut self, size: i64) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn signatory_people(mut self, people: &[&str]) -> Self {
        self.signatory_people = Some(people.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn build_json(self) -> serde_json::Value {
        let mut config = serde_json::json!({ "version": self.version });
        if let Some(listen) = self.listen {
            config["server"] = serde_json::json!({ "listen": listen });
        }
        if let Some(path) = self.database_path {
            config["database"] = serde_json::json!({ "path": path });
        }
        if let Some(size) = self.page_size {
            config["table"] = serde_json::json!({ "pageSize": size });
        }
        if let Some(people) = self.signatory_people {
            config["form"] = serde_json::json!({ "signatoryPeople": people });
        }
        if let Some(url) = self.base_url {
            config["client"] = serde_json::json!({ "baseUrl": url });
        }
        config
    }

    pub fn build_string(self) -> String {
        serde_json::to_string_pretty(&self.build_json()).expect("Failed to serialize config")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds request submissions.
pub struct PayloadBuilder {
    payload: RequestPayload,
}

impl PayloadBuilder {
    pub fn save(details: &str) -> Self {
        Self::with_action(RequestAction::Save, details)
    }

    pub fn update(id: i64, details: &str) -> Self {
        let mut builder = Self::with_action(RequestAction::Update, details);
        builder.payload.id = Some(id);
        builder
    }

    fn with_action(action: RequestAction, details: &str) -> Self {
        Self {
            payload: RequestPayload {
                details: Some(details.to_string()),
                action: Some(action),
                ..Default::default()
            },
        }
    }

    pub fn branch(mut self, id: i64) -> Self {
        self.payload.branch_id = Some(id);
        self
    }

    pub fn department(mut self, id: i64) -> Self {
        self.payload.department_id = Some(id);
        self
    }

    pub fn mis(mut self, id: i64) -> Self {
        self.payload.mis_id = Some(id);
        self
    }

    pub fn build(self) -> RequestPayload {
        self.payload
    }
}
