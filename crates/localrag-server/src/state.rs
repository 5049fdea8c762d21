use localrag_agent::Agent;

pub(crate) struct ServerState {
    agent: Agent,
}

impl ServerState {
    pub(crate) fn new(agent: Agent) -> Self {
        Self { agent }
    }

    pub(crate) fn agent(&self) -> Agent {
        self.agent.clone()
    }
}
