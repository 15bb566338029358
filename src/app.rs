use crate::community::CommunityWall;
use crate::config::ShowcaseConfig;
use crate::nav::NavBar;
use crate::showcase::VideoShowcase;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    #[prop_or_default]
    pub config: ShowcaseConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = &props.config;

    html! {
        <>
            <NavBar />
            <main class="page">
                <VideoShowcase
                    videos={config.videos.clone()}
                    tuning={config.tuning.clone()}
                />
                <CommunityWall
                    supporters_url={config.supporters_url.clone()}
                    storage_key={config.storage_key.clone()}
                    avatar_base_url={config.avatar_base_url.clone()}
                    profile_base_url={config.profile_base_url.clone()}
                    milestone={config.supporter_milestone}
                />
            </main>
            <footer class="footer">
                <p>{"Visual Builders"}</p>
            </footer>
        </>
    }
}
