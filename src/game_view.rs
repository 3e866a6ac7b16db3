use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use kurosuwado_core::{GameUpdate, Puzzle};

use crate::app_router::{self, ViewConfig};
use crate::game_store::{GameStore, ViewSnapshot};
use crate::game_sync::{fetch_game, GameSyncAdapter};

const BLOCK_FILL: &str = "rgb(24 24 27)";
const CELL_FILL: &str = "#fff";

#[derive(Properties, PartialEq)]
pub(crate) struct GameViewProps {
    pub(crate) config: ViewConfig,
}

fn spawn_fetch(
    store: Rc<GameStore>,
    api_base: Option<String>,
    game_id: String,
    fetching: UseStateHandle<bool>,
) {
    let Some(api_base) = api_base else {
        gloo::console::warn!("no api endpoint available");
        return;
    };
    fetching.set(true);
    spawn_local(async move {
        match fetch_game(&api_base, &game_id).await {
            Ok(record) => store.apply_fetch(&record),
            Err(err) => gloo::console::warn!("game fetch failed:", err),
        }
        fetching.set(false);
    });
}

#[function_component(GameView)]
pub(crate) fn game_view(props: &GameViewProps) -> Html {
    let store = use_memo((), |_| GameStore::new());
    let view = use_state(ViewSnapshot::default);
    let fetching = use_state(|| false);
    let adapter = use_mut_ref(GameSyncAdapter::new);
    let game_id = props.config.game_id.clone();

    {
        let store = store.clone();
        let view = view.clone();
        let fetching = fetching.clone();
        let adapter = adapter.clone();
        let game_id = game_id.clone();
        let clear_hash = props.config.clear_hash;
        use_effect_with((), move |_| {
            if clear_hash {
                app_router::clear_location_hash();
            }
            let store_for_hook = store.clone();
            store.set_on_change(Rc::new(move || {
                view.set(store_for_hook.snapshot());
            }));
            spawn_fetch(
                store.clone(),
                app_router::default_api_base(),
                game_id.clone(),
                fetching,
            );
            if let Some(ws_base) = app_router::default_ws_base() {
                let url = app_router::build_subscription_url(&ws_base, &game_id);
                let store_for_update = store.clone();
                let on_update =
                    Rc::new(move |update: GameUpdate| store_for_update.apply_update(update));
                let on_fail = Rc::new(|| {
                    gloo::console::warn!("subscription lost; refetch to resync");
                });
                adapter
                    .borrow_mut()
                    .subscribe(&url, &game_id, on_update, on_fail);
            } else {
                gloo::console::warn!("no subscription endpoint available");
            }
            move || {
                adapter.borrow_mut().disconnect();
                store.teardown();
            }
        });
    }

    let on_refetch = {
        let store = store.clone();
        let fetching = fetching.clone();
        let game_id = game_id.clone();
        Callback::from(move |_event: MouseEvent| {
            spawn_fetch(
                store.clone(),
                app_router::default_api_base(),
                game_id.clone(),
                fetching.clone(),
            );
        })
    };

    let snapshot = (*view).clone();
    let grid = match snapshot.puzzle.as_ref() {
        Some(puzzle) => render_grid(puzzle, &snapshot),
        None => html! { <div class="grid-placeholder">{ "Loading puzzle..." }</div> },
    };
    let refetch_content = if *fetching {
        html! {
            <svg class="spinner" viewBox="0 0 50 50">
                <circle class="path" cx="25" cy="25" r="20" fill="none" stroke-width="7"></circle>
            </svg>
        }
    } else {
        html! { <span>{ "Refetch" }</span> }
    };

    html! {
        <div class="game-view">
            { grid }
            <button class="refetch" onclick={on_refetch} disabled={*fetching}>
                { refetch_content }
            </button>
        </div>
    }
}

fn render_grid(puzzle: &Puzzle, snapshot: &ViewSnapshot) -> Html {
    let cols = puzzle.size.cols;
    let cells: Html = (0..puzzle.cell_count())
        .map(|index| {
            let block = puzzle.is_block(index);
            let background = if block {
                BLOCK_FILL
            } else {
                snapshot
                    .highlights
                    .get(&index)
                    .copied()
                    .unwrap_or(CELL_FILL)
            };
            let number = puzzle.gridnums.get(index).copied().unwrap_or(0);
            let number_label = if number > 0 {
                number.to_string()
            } else {
                String::new()
            };
            let letter = if block {
                ""
            } else {
                snapshot
                    .answers
                    .get(index)
                    .map(String::as_str)
                    .unwrap_or("")
            };
            html! {
                <div
                    key={index.to_string()}
                    class="cell"
                    style={format!("background-color: {background};")}
                >
                    <div class="cell-number">{ number_label }</div>
                    <div class="cell-letter">{ letter }</div>
                </div>
            }
        })
        .collect();
    html! {
        <div class="grid-frame">
            <div
                class="grid"
                style={format!(
                    "grid-template-columns: repeat({cols}, 1fr); font-size: calc(min(100vw, 100vh) / {cols} / 1.5);"
                )}
            >
                { cells }
            </div>
        </div>
    }
}
