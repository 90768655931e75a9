//! Default host personas for each generation mode.
//!
//! A pure lookup over fixed tables built once at first use. Callers may
//! bypass the registry entirely by passing custom hosts to the planner;
//! dialogue parsing then routes by name against whatever list was supplied.

use std::sync::LazyLock;

use super::model::{Host, PodcastMode};

static SOLO_HOSTS: LazyLock<Vec<Host>> = LazyLock::new(|| {
    vec![Host::new(
        "Alex",
        "Single narrator with news-reader style delivery",
        "en-US-Standard-A",
    )]
});

static SINGLE_LLM_HOSTS: LazyLock<Vec<Host>> = LazyLock::new(|| {
    vec![
        Host::new(
            "Dr. Ada",
            "Expert host: friendly, concise, knowledgeable",
            "en-US-Standard-A",
        ),
        Host::new(
            "Ben",
            "Curious co-host: asks clarifying questions, represents the audience",
            "en-US-Standard-B",
        ),
    ]
});

static MULTI_AGENT_HOSTS: LazyLock<Vec<Host>> = LazyLock::new(|| {
    vec![
        Host::new(
            "Dr. Ada",
            "Expert host: friendly, concise, knowledgeable",
            "en-US-Standard-A",
        ),
        Host::new(
            "Ben",
            "Curious co-host: asks clarifying questions",
            "en-US-Standard-B",
        ),
        Host::new(
            "Chloe",
            "Fact-checker: provides additional context and verification",
            "en-US-Standard-C",
        ),
    ]
});

/// Default hosts for a generation mode, in speaking-priority order.
pub fn personas_for(mode: PodcastMode) -> Vec<Host> {
    match mode {
        PodcastMode::Solo => SOLO_HOSTS.clone(),
        PodcastMode::SingleLlm => SINGLE_LLM_HOSTS.clone(),
        PodcastMode::MultiAgent => MULTI_AGENT_HOSTS.clone(),
    }
}
