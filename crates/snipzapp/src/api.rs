//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the [`RootStore`].
//! It is the single entry point for UI clients: the CLI, or a message handler that
//! receives JSON requests.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** each request to its command under [`RootStore::mutate`] or
//!   [`RootStore::read`]
//! - **Converts every outcome into a [`Response`]**: errors never cross this boundary
//! - **Reports persistence separately**: a mutation that succeeded in memory but could
//!   not be written is `success: true` with `persistError` set
//!
//! ## Response Shape
//!
//! ```text
//! { "success": true,  "snippet": { "index": 2, "name": "greeting", "body": "Hi" } }
//! { "success": false, "error": "Duplicate name: \"Greeting\" already exists in this folder",
//!   "errorKind": "DuplicateName" }
//! { "success": true,  "snippet": { ... }, "persistError": "IO error: ..." }
//! ```
//!
//! ## Messages
//!
//! [`SnipzApi::handle_message`] accepts the same requests as JSON objects tagged with
//! an `action` field (`createSnippet`, `editSnippet`, `deleteSnippet`, `createFolder`,
//! `search`, `list`, `getSettings`, `updateSettings`).
//!
//! ## Generic Over StorageBackend
//!
//! `SnipzApi<B: StorageBackend>`:
//! - Production: `SnipzApi<FsBackend>`
//! - Testing: `SnipzApi<MemBackend>`

use crate::commands::{
    self, CreateRequest, DeleteRequest, EditRequest, FolderRequest, SearchRequest,
};
use crate::commands::search::SearchHit;
use crate::error::{FailureKind, Result, SnipzError};
use crate::index::{entries, IndexedEntry};
use crate::model::{Folder, NodeRef, Snippet};
use crate::settings::Settings;
use crate::store::{Committed, RootStore, StorageBackend, StoreOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetView {
    pub index: usize,
    pub name: String,
    pub body: String,
}

impl From<&Snippet> for SnippetView {
    fn from(snippet: &Snippet) -> Self {
        Self {
            index: snippet.index,
            name: snippet.name.clone(),
            body: snippet.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderView {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Snippet,
}

/// One row of [`SnipzApi::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub index: usize,
    pub depth: usize,
    pub kind: NodeKind,
    pub folder_path: Vec<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl From<&IndexedEntry<'_>> for EntryView {
    fn from(entry: &IndexedEntry<'_>) -> Self {
        let (kind, body) = match entry.node {
            NodeRef::Folder(_) => (NodeKind::Folder, None),
            NodeRef::Snippet(snippet) => (NodeKind::Snippet, Some(snippet.body.clone())),
        };
        Self {
            index: entry.index,
            depth: entry.depth,
            kind,
            folder_path: entry.path.iter().map(|s| s.to_string()).collect(),
            name: entry.node.name().to_string(),
            body,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<SnippetView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<SearchHit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<EntryView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failure(err: &SnipzError) -> Self {
        debug!(error = %err, "request failed");
        Self {
            success: false,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            ..Default::default()
        }
    }
}

/// A JSON request tagged with its `action`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    CreateSnippet(CreateRequest),
    EditSnippet(EditRequest),
    DeleteSnippet(DeleteRequest),
    CreateFolder(FolderRequest),
    Search(SearchRequest),
    List,
    GetSettings,
    UpdateSettings { settings: Settings },
}

/// The main API facade for snipz operations.
pub struct SnipzApi<B: StorageBackend> {
    store: RootStore<B>,
}

impl<B: StorageBackend> SnipzApi<B> {
    pub fn new(store: RootStore<B>) -> Self {
        Self { store }
    }

    pub fn open(backend: B, options: StoreOptions) -> Result<Self> {
        Ok(Self::new(RootStore::open(backend, options)?))
    }

    pub fn create_snippet(&self, request: &CreateRequest) -> Response {
        respond(
            self.store.mutate(|root| commands::create::run(root, request)),
            |snippet, response| response.snippet = Some(SnippetView::from(&snippet)),
        )
    }

    pub fn edit_snippet(&self, request: &EditRequest) -> Response {
        respond(
            self.store.mutate(|root| commands::edit::run(root, request)),
            |snippet, response| response.snippet = Some(SnippetView::from(&snippet)),
        )
    }

    pub fn delete_snippet(&self, request: &DeleteRequest) -> Response {
        respond(
            self.store.mutate(|root| commands::delete::run(root, request)),
            |_, _| {},
        )
    }

    pub fn create_folder(&self, request: &FolderRequest) -> Response {
        respond(
            self.store
                .mutate(|root| commands::create_folder::run(root, request)),
            |folder: Folder, response| {
                response.folder = Some(FolderView {
                    index: folder.index,
                    name: folder.name,
                })
            },
        )
    }

    pub fn search(&self, request: &SearchRequest) -> Response {
        match self
            .store
            .read(|root, _| commands::search::run(root, request))
        {
            Ok(hits) => Response {
                hits: Some(hits),
                ..Response::ok()
            },
            Err(err) => Response::failure(&err),
        }
    }

    /// The whole tree in index order, root first.
    pub fn list(&self) -> Response {
        let rows: Vec<EntryView> = self
            .store
            .read(|root, _| entries(root).iter().map(EntryView::from).collect());
        Response {
            entries: Some(rows),
            ..Response::ok()
        }
    }

    pub fn settings(&self) -> Response {
        Response {
            settings: Some(self.store.settings()),
            ..Response::ok()
        }
    }

    pub fn update_settings(&self, settings: Settings) -> Response {
        let committed = self.store.update_settings(settings);
        Response {
            settings: Some(self.store.settings()),
            persist_error: committed.persist_error,
            ..Response::ok()
        }
    }

    pub fn handle(&self, message: Message) -> Response {
        match message {
            Message::CreateSnippet(request) => self.create_snippet(&request),
            Message::EditSnippet(request) => self.edit_snippet(&request),
            Message::DeleteSnippet(request) => self.delete_snippet(&request),
            Message::CreateFolder(request) => self.create_folder(&request),
            Message::Search(request) => self.search(&request),
            Message::List => self.list(),
            Message::GetSettings => self.settings(),
            Message::UpdateSettings { settings } => self.update_settings(settings),
        }
    }

    /// Decodes a JSON message and handles it. Undecodable messages are `InvalidInput`.
    pub fn handle_message(&self, message: Value) -> Response {
        match serde_json::from_value::<Message>(message) {
            Ok(message) => self.handle(message),
            Err(err) => Response::failure(&SnipzError::InvalidInput(err.to_string())),
        }
    }

    pub fn store(&self) -> &RootStore<B> {
        &self.store
    }

    /// Flushes pending writes and releases the store.
    pub fn close(self) -> Result<B> {
        self.store.close()
    }
}

fn respond<T>(result: Result<Committed<T>>, fill: impl FnOnce(T, &mut Response)) -> Response {
    match result {
        Ok(Committed {
            value,
            persist_error,
        }) => {
            let mut response = Response::ok();
            fill(value, &mut response);
            response.persist_error = persist_error;
            response
        }
        Err(err) => Response::failure(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;
    use serde_json::json;

    fn api() -> SnipzApi<MemBackend> {
        let api = SnipzApi::open(MemBackend::new(), StoreOptions::default()).unwrap();
        assert!(api.create_folder(&FolderRequest::new("Work")).success);
        api
    }

    #[test]
    fn test_create_returns_snippet_with_index() {
        let api = api();
        let response =
            api.create_snippet(&CreateRequest::new("greeting", "Hi").in_folder(["Work"]));

        assert!(response.success);
        let snippet = response.snippet.unwrap();
        assert_eq!(snippet.name, "greeting");
        assert_eq!(snippet.index, 2);
        assert!(response.persist_error.is_none());
    }

    #[test]
    fn test_failures_carry_message_and_kind() {
        let api = api();
        api.create_snippet(&CreateRequest::new("greeting", "Hi").in_folder(["Work"]));
        let response =
            api.create_snippet(&CreateRequest::new("Greeting", "Hi2").in_folder(["Work"]));

        assert!(!response.success);
        assert_eq!(response.error_kind, Some(FailureKind::DuplicateName));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["errorKind"], json!("DuplicateName"));
        assert!(value["error"].as_str().unwrap().contains("Greeting"));
        assert!(value.get("snippet").is_none());
    }

    #[test]
    fn test_persist_failure_is_reported_beside_success() {
        let options = StoreOptions {
            persist_retries: 0,
            ..Default::default()
        };
        let api = SnipzApi::open(MemBackend::new(), options).unwrap();
        api.store().backend().fail_next_writes(1);

        let response = api.create_snippet(&CreateRequest::new("a", "1"));

        assert!(response.success);
        assert!(response.snippet.is_some());
        assert!(response.persist_error.is_some());
        assert!(api.store().is_dirty());
    }

    #[test]
    fn test_delete_acknowledges_without_payload() {
        let api = api();
        api.create_snippet(&CreateRequest::new("a", "1"));
        let response = api.delete_snippet(&DeleteRequest::new("a"));
        assert!(response.success);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": true })
        );

        let response = api.delete_snippet(&DeleteRequest::new("a"));
        assert_eq!(response.error_kind, Some(FailureKind::NotFound));
    }

    #[test]
    fn test_list_flattens_tree() {
        let api = api();
        api.create_snippet(&CreateRequest::new("greeting", "Hi").in_folder(["Work"]));

        let rows = api.list().entries.unwrap();
        let kinds: Vec<_> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Folder, NodeKind::Folder, NodeKind::Snippet]
        );
        assert_eq!(rows[2].folder_path, vec!["Work"]);
        assert_eq!(rows[2].body.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_messages_dispatch_by_action() {
        let api = api();
        let response = api.handle_message(json!({
            "action": "createSnippet",
            "name": "greeting",
            "body": "Hi",
            "folderPath": ["Work"]
        }));
        assert!(response.success);

        let response = api.handle_message(json!({
            "action": "editSnippet",
            "snippetId": "greeting",
            "folderPath": []
        }));
        assert!(response.success);
        assert_eq!(response.snippet.unwrap().index, 2);

        let response = api.handle_message(json!({ "action": "search", "term": "hi" }));
        assert_eq!(response.hits.unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_messages_are_invalid_input() {
        let api = api();
        let response = api.handle_message(json!({ "action": "explode" }));
        assert!(!response.success);
        assert_eq!(response.error_kind, Some(FailureKind::InvalidInput));
    }

    #[test]
    fn test_settings_round_trip_through_messages() {
        let api = api();
        let mut settings = Settings::default();
        settings.tab_key_expansion = true;

        let response = api.handle(Message::UpdateSettings { settings });
        assert!(response.success);

        let response = api.handle_message(json!({ "action": "getSettings" }));
        assert!(response.settings.unwrap().tab_key_expansion);
    }
}
