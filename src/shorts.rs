//! The YouTube Shorts generator: script writer, then visual concepts, then final formatting.

use crate::{
    agent::{LlmAgent, SequentialAgent},
    config::Config,
};

pub const NAME: &str = "youtube_shorts_agent";

pub const SCRIPT_KEY: &str = "generated_script";
pub const VISUALS_KEY: &str = "visual_concepts";
pub const FINAL_KEY: &str = "final_short_concept";

pub fn scriptwriter_agent(config: &Config) -> LlmAgent {
    LlmAgent::new("scriptwriter_agent", config)
        .with_description("Writes an engaging YouTube Shorts script for the requested topic.")
        .with_instruction(include_str!("../prompts/scriptwriter.txt"))
        .with_output_key(SCRIPT_KEY)
}

pub fn visualizer_agent(config: &Config) -> LlmAgent {
    LlmAgent::new("visualizer_agent", config)
        .with_description("Proposes visual concepts for each part of the script.")
        .with_instruction(include_str!("../prompts/visualizer.txt"))
        .with_output_key(VISUALS_KEY)
}

pub fn formatter_agent(config: &Config) -> LlmAgent {
    LlmAgent::new("formatter_agent", config)
        .with_description("Merges script and visuals into the final Short concept.")
        .with_instruction(include_str!("../prompts/formatter.txt"))
        .with_output_key(FINAL_KEY)
}

/// Root agent running the three stages in order.
pub fn shorts_agent(config: &Config) -> SequentialAgent {
    SequentialAgent::new(
        NAME,
        "Generates a complete YouTube Shorts concept: script, visuals and final formatting.",
        vec![
            scriptwriter_agent(config),
            visualizer_agent(config),
            formatter_agent(config),
        ],
    )
}
