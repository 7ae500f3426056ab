//! Fakes shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LicenseError;
use crate::models::LicenseSummary;
use crate::prompt::Prompter;
use crate::registry::http::{HttpFetch, HttpResponse};

pub const BASE_URL: &str = "https://api.test";

/// Serves canned responses by URL and records every request.
#[derive(Default)]
pub struct FakeFetcher {
    routes: HashMap<String, Result<HttpResponse, String>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            format!("{}{}", BASE_URL, path),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.routes
            .insert(format!("{}{}", BASE_URL, path), Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpFetch for FakeFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, LicenseError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(LicenseError::Transport(message.clone())),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            }),
        }
    }
}

/// Answers prompts from a fixed script and records what it was shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub picks: VecDeque<Option<usize>>,
    pub confirms: VecDeque<bool>,
    pub shown: Vec<Vec<LicenseSummary>>,
    pub confirm_calls: usize,
}

impl ScriptedPrompter {
    pub fn picking(index: Option<usize>) -> Self {
        Self {
            picks: VecDeque::from([index]),
            ..Self::default()
        }
    }

    pub fn confirming(answer: bool) -> Self {
        Self {
            confirms: VecDeque::from([answer]),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn pick_license(
        &mut self,
        licenses: &[LicenseSummary],
    ) -> Result<Option<usize>, LicenseError> {
        self.shown.push(licenses.to_vec());
        Ok(self.picks.pop_front().flatten())
    }

    fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool, LicenseError> {
        self.confirm_calls += 1;
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}
