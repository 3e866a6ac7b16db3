use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::net::http::Request;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use kurosuwado_core::{
    decode_game_update, encode_subscribe, GameByIdData, GameRecord, GameUpdate, GameVariables,
    GraphqlRequest, GraphqlResponse, GAME_QUERY,
};

/// Fetch-by-identifier over GraphQL. Re-invocable on manual refresh; a
/// failure leaves the caller's state untouched.
pub(crate) async fn fetch_game(api_base: &str, game_id: &str) -> Result<GameRecord, String> {
    let body = GraphqlRequest {
        query: GAME_QUERY,
        variables: GameVariables { game_id },
    };
    let response = Request::post(api_base)
        .json(&body)
        .map_err(|err| err.to_string())?
        .send()
        .await
        .map_err(|err| err.to_string())?;
    if !response.ok() {
        return Err(format!("game query failed: http {}", response.status()));
    }
    let envelope: GraphqlResponse<GameByIdData> =
        response.json().await.map_err(|err| err.to_string())?;
    let data = envelope
        .data
        .ok_or_else(|| "game query returned no data".to_string())?;
    Ok(data.game_by_id)
}

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(Event)>,
}

/// Push-update subscription over a WebSocket. At most one live subscription
/// per view; subscribing again tears down the previous socket first.
#[derive(Clone)]
pub(crate) struct GameSyncAdapter {
    ws: Rc<RefCell<Option<WebSocket>>>,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
    closing: Rc<Cell<bool>>,
}

impl GameSyncAdapter {
    pub(crate) fn new() -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            handlers: Rc::new(RefCell::new(None)),
            closing: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        url: &str,
        topic: &str,
        on_update: Rc<dyn Fn(GameUpdate)>,
        on_fail: Rc<dyn Fn()>,
    ) {
        self.disconnect();
        let closing = Rc::new(Cell::new(false));
        self.closing = closing.clone();

        let url = url.trim();
        if url.is_empty() {
            return;
        }

        let ws = match WebSocket::new(url) {
            Ok(ws) => ws,
            Err(_) => {
                gloo::console::warn!("failed to open subscription socket", url);
                on_fail();
                return;
            }
        };
        *self.ws.borrow_mut() = Some(ws.clone());

        let opened = Rc::new(Cell::new(false));
        let onopen = {
            let opened = opened.clone();
            let ws = ws.clone();
            let url = url.to_string();
            let topic = topic.to_string();
            Closure::wrap(Box::new(move |_event: Event| {
                opened.set(true);
                gloo::console::log!("subscription open", url.clone(), topic.clone());
                if let Some(frame) = encode_subscribe(&topic) {
                    let _ = ws.send_with_str(&frame);
                }
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let on_update = on_update.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    return;
                };
                if let Some(update) = decode_game_update(&text) {
                    on_update(update);
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: ErrorEvent| {
                gloo::console::warn!("subscription socket error", url.clone());
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let ws_ref = self.ws.clone();
            let handlers_ref = self.handlers.clone();
            let opened = opened.clone();
            let url = url.to_string();
            let on_fail = on_fail.clone();
            let closing = closing.clone();
            Closure::wrap(Box::new(move |event: Event| {
                ws_ref.borrow_mut().take();
                handlers_ref.borrow_mut().take();
                if closing.get() {
                    return;
                }
                if !opened.get() {
                    gloo::console::warn!(
                        "subscription failed to connect (game may be invalid)",
                        url.clone()
                    );
                    on_fail();
                    return;
                }
                if let Some(close) = event.dyn_ref::<CloseEvent>() {
                    let reason = close.reason();
                    if reason.is_empty() {
                        gloo::console::log!("subscription closed", url.clone(), close.code());
                    } else {
                        gloo::console::log!(
                            "subscription closed",
                            url.clone(),
                            close.code(),
                            reason
                        );
                    }
                } else {
                    gloo::console::log!("subscription closed", url.clone());
                }
                on_fail();
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *self.handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });
    }

    pub(crate) fn disconnect(&mut self) {
        self.closing.set(true);
        self.handlers.borrow_mut().take();
        if let Some(ws) = self.ws.borrow_mut().take() {
            let _ = ws.close();
        }
    }
}

impl Default for GameSyncAdapter {
    fn default() -> Self {
        Self::new()
    }
}
