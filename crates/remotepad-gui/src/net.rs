//! Loader/Saver transport: single-shot HTTP requests whose completion
//! callbacks post a [`NetEvent`] back to the UI loop and request a repaint.
//! Neither call blocks the UI thread; all session mutation happens when the
//! update loop drains the channel.

use std::sync::mpsc::Sender;

use eframe::egui;
use remotepad_core::MAX_FILE_BYTES;
use remotepad_core::remote::{LoadError, SaveError};
use serde::Deserialize;

#[derive(Debug)]
pub(crate) enum NetEvent {
    LoadFinished {
        generation: u64,
        result: Result<String, LoadError>,
    },
    SaveFinished(Result<(), SaveError>),
}

/// Error payload the hosting service attaches to non-2xx responses.
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

fn api_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiMessage>(bytes)
        .ok()
        .map(|payload| payload.message)
}

fn load_result(ok: bool, status: u16, bytes: &[u8]) -> Result<String, LoadError> {
    load_result_with_limit(ok, status, bytes, MAX_FILE_BYTES)
}

fn load_result_with_limit(
    ok: bool,
    status: u16,
    bytes: &[u8],
    limit: u64,
) -> Result<String, LoadError> {
    if !ok {
        return Err(api_message(bytes).map_or(LoadError::Status(status), LoadError::Api));
    }
    if bytes.len() as u64 > limit {
        return Err(LoadError::TooLarge { limit });
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Err(LoadError::NotText),
    }
}

fn save_result(ok: bool, status: u16, bytes: &[u8]) -> Result<(), SaveError> {
    if ok {
        Ok(())
    } else {
        Err(api_message(bytes).map_or(SaveError::Status(status), SaveError::Api))
    }
}

/// Issue the one-shot read request for the file content.
pub(crate) fn fetch_content(
    ctx: &egui::Context,
    events: &Sender<NetEvent>,
    url: &str,
    generation: u64,
) {
    let ctx = ctx.clone();
    let events = events.clone();

    ehttp::fetch(ehttp::Request::get(url), move |response| {
        let result = match response {
            Ok(response) => load_result(response.ok, response.status, &response.bytes),
            Err(err) => Err(LoadError::Transport(err)),
        };
        let _ = events.send(NetEvent::LoadFinished { generation, result });
        ctx.request_repaint();
    });
}

/// Transmit the full newline-joined text as an overwrite request.
pub(crate) fn store_content(
    ctx: &egui::Context,
    events: &Sender<NetEvent>,
    url: &str,
    body: String,
) {
    let ctx = ctx.clone();
    let events = events.clone();

    ehttp::fetch(ehttp::Request::post(url, body.into_bytes()), move |response| {
        let result = match response {
            Ok(response) => save_result(response.ok, response.status, &response.bytes),
            Err(err) => Err(SaveError::Transport(err)),
        };
        let _ = events.send(NetEvent::SaveFinished(result));
        ctx.request_repaint();
    });
}
