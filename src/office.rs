use crate::{agent::LlmAgent, config::Config, tools::office_tools};

pub const NAME: &str = "it_office_agent";

/// Builds the IT-office agent with all ecommerce tools attached.
pub fn office_agent(config: &Config) -> LlmAgent {
    LlmAgent::new(NAME, config)
        .with_description("Manage products, stock, orders & reports for ecommerce shops.")
        .with_instruction(include_str!("../prompts/it_office.txt"))
        .with_tools(office_tools())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Session;

    #[test]
    fn office_agent_offers_every_tool() {
        let agent = office_agent(&Config::default());
        assert_eq!(agent.name, "it_office_agent");
        assert_eq!(agent.tools().len(), 5);
        assert!(agent.output_key().is_none());

        let chat_req = agent.start_chat(&Session::default());
        assert!(chat_req.system.unwrap().contains("IT-Office agent"));
    }
}
