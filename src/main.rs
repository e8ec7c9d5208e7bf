use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod growth {
    pub mod counter;
    pub mod error;
    pub mod hover;
    pub mod market;
    pub mod milestones;
    pub mod stats;
    pub mod trajectory;
    pub mod visibility;
}
mod components {
    pub mod charts;
    pub mod in_view;
    pub mod milestone_cards;
    pub mod stat_cards;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Rendering not found page");
            html! {
                <div class="not-found">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home}>{"Back to the home page"}</Link<Route>>
                </div>
            }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
