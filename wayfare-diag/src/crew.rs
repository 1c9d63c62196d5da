//! Minimal agent/task/crew model: personas and tasks compose prompts, and
//! the crew runs its tasks in order against one language model.

use wayfare_infra::{LanguageModel, LlmError};

#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("Crew has no tasks to run")]
    NoTasks,
    #[error("Task {task} refers to missing agent {agent}")]
    MissingAgent { task: usize, agent: usize },
    #[error(transparent)]
    Model(#[from] LlmError),
}

impl CrewError {
    pub fn kind(&self) -> &'static str {
        match self {
            CrewError::NoTasks => "NoTasks",
            CrewError::MissingAgent { .. } => "MissingAgent",
            CrewError::Model(e) => e.kind(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Agent {
    pub fn new(role: &str, goal: &str, backstory: &str) -> Self {
        Self {
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
    /// Index into the crew's agents
    pub agent: usize,
}

impl Task {
    pub fn new(description: &str, expected_output: &str, agent: usize) -> Self {
        Self {
            description: description.to_string(),
            expected_output: expected_output.to_string(),
            agent,
        }
    }

    fn prompt(&self, agent: &Agent, context: Option<&str>) -> String {
        let mut prompt = format!(
            "You are {}. {}\nYour personal goal is: {}\n\nCurrent Task: {}\n\nThis is the expected criteria for your final answer: {}\n",
            agent.role, agent.backstory, agent.goal, self.description, self.expected_output
        );
        if let Some(context) = context {
            prompt.push_str("\nThis is the context you're working with:\n");
            prompt.push_str(context);
            prompt.push('\n');
        }
        prompt
    }
}

#[derive(Debug, Clone)]
pub struct Crew {
    pub agents: Vec<Agent>,
    pub tasks: Vec<Task>,
    pub verbose: bool,
}

impl Crew {
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Self {
        Self { agents, tasks, verbose: false }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs every task once, in order, feeding each answer to the next task.
    /// Returns the last task's answer.
    pub async fn kickoff(&self, model: &dyn LanguageModel) -> Result<String, CrewError> {
        if self.tasks.is_empty() {
            return Err(CrewError::NoTasks);
        }

        let mut last: Option<String> = None;
        for (i, task) in self.tasks.iter().enumerate() {
            let agent = self
                .agents
                .get(task.agent)
                .ok_or(CrewError::MissingAgent { task: i, agent: task.agent })?;

            let prompt = task.prompt(agent, last.as_deref());
            if self.verbose {
                tracing::info!(agent = %agent.role, model = model.id(), "Working Agent starting task {}", i);
                tracing::debug!("Prompt:\n{}", prompt);
            }

            let answer = model.generate(&prompt).await?;
            if self.verbose {
                tracing::info!(agent = %agent.role, "Final Answer: {}", answer.trim());
            }
            last = Some(answer);
        }

        Ok(last.unwrap_or_default())
    }
}
