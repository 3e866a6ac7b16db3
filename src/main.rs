mod app_router;
mod game_store;
mod game_sync;
mod game_view;

use yew::prelude::*;

use crate::game_view::GameView;

#[function_component(App)]
fn app() -> Html {
    let content = match app_router::load_view_config() {
        Some(config) => html! { <GameView config={config} /> },
        None => landing(),
    };
    html! {
        <main class="app">
            <nav class="top-bar">
                <h1 class="brand">{ "Kurosuwado" }</h1>
            </nav>
            { content }
        </main>
    }
}

fn landing() -> Html {
    html! {
        <div class="landing">
            <h2>{ "Solve crosswords together." }</h2>
            <p>
                { "Open a shared game with " }
                <code>{ "#game=<id>" }</code>
                { " in the address bar to watch it live." }
            </p>
            <div class="landing-links">
                <a href="https://github.com/kurosuwado/kurosuwado">{ "Viewer source" }</a>
                <a href="https://github.com/kurosuwado/kurosuwado-api">{ "API source" }</a>
            </div>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
