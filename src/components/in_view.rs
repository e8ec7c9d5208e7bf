use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

/// Becomes `true` the first time `node` scrolls into view and stays `true`.
/// The observer is disconnected after that first hit, or on unmount.
#[hook]
pub fn use_in_view(node: NodeRef, root_margin: &'static str) -> bool {
    let in_view = use_state(|| false);

    {
        let in_view = in_view.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let mut observer: Option<IntersectionObserver> = None;
                let mut callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>> = None;

                if let Some(element) = node.cast::<Element>() {
                    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                        move |entries: Array, observer: IntersectionObserver| {
                            let intersecting = entries.iter().any(|entry| {
                                entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting()
                            });
                            if intersecting {
                                debug!("section scrolled into view");
                                in_view.set(true);
                                observer.disconnect();
                            }
                        },
                    );

                    let options = IntersectionObserverInit::new();
                    options.set_root_margin(root_margin);

                    match IntersectionObserver::new_with_options(
                        on_intersect.as_ref().unchecked_ref(),
                        &options,
                    ) {
                        Ok(created) => {
                            created.observe(&element);
                            observer = Some(created);
                            callback = Some(on_intersect);
                        }
                        Err(err) => {
                            warn!("IntersectionObserver unavailable: {:?}", err);
                        }
                    }
                }

                move || {
                    if let Some(observer) = observer {
                        observer.disconnect();
                    }
                    drop(callback);
                }
            },
            node,
        );
    }

    *in_view
}
