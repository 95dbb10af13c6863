//! Sample data for demos
//!
//! Replaces everything in the store with a fixed set of models, plugins,
//! conversations and messages.

use chrono::Duration;

use crate::models::entity::{ROLE_ASSISTANT, ROLE_USER};
use crate::models::{now, Conversation, Message, MessageMetadata, Model, ModelStatus, Plugin};
use crate::store::{Result, Store};

/// Record counts written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub models: usize,
    pub plugins: usize,
    pub conversations: usize,
    pub messages: usize,
}

fn sample_models() -> Vec<Model> {
    vec![
        Model::new(
            "GPT-3.5",
            "A fast and efficient model for most tasks, optimized for chat",
            "https://api.openai.com/v1/chat/completions",
            ModelStatus::Active,
        ),
        Model::new(
            "GPT-4",
            "Advanced capabilities for complex tasks, longer context, and better reasoning",
            "https://api.openai.com/v1/chat/completions",
            ModelStatus::Active,
        ),
        Model::new(
            "Claude 2",
            "Anthropic's advanced AI assistant with strong conversational abilities",
            "https://api.anthropic.com/v1/messages",
            ModelStatus::Active,
        ),
        Model::new(
            "Llama 2",
            "Meta's open-source large language model",
            "https://api.meta.com/llama/v1/chat",
            ModelStatus::Inactive,
        ),
    ]
}

fn sample_plugins() -> Vec<Plugin> {
    vec![
        Plugin::new("Web Search", "Search the web for real-time information", "1.0.0", true),
        Plugin::new(
            "Code Interpreter",
            "Run and execute code in various programming languages",
            "1.2.1",
            true,
        ),
        Plugin::new("Image Generation", "Generate images from text descriptions", "0.9.5", true),
        Plugin::new("File Reader", "Read and analyze different file formats", "1.1.0", false),
    ]
}

const AI_TYPES_ANSWER: &str = "Artificial Intelligence can be categorized in several ways:

1. **Narrow AI (Weak AI)**: Systems designed for a specific task (e.g., virtual assistants, recommendation systems).

2. **General AI (Strong AI)**: Systems with human-like intelligence across different domains (still theoretical).

3. **Supervised Learning**: Algorithms trained on labeled data.

4. **Unsupervised Learning**: Algorithms that find patterns in unlabeled data.

5. **Reinforcement Learning**: Algorithms that learn through trial and error.

6. **Machine Learning**: AI systems that improve through experience.

7. **Deep Learning**: Neural network-based AI with multiple layers.

8. **Expert Systems**: Rule-based systems for specific domains.

Which of these would you like to learn more about?";

const TODO_APP_ANSWER: &str = r#"Here's how to create a basic Todo List app in React:

```jsx
import React, { useState } from 'react';

function TodoApp() {
  const [todos, setTodos] = useState([]);
  const [input, setInput] = useState('');

  const addTodo = () => {
    if (input.trim() !== '') {
      setTodos([...todos, { text: input, completed: false, id: Date.now() }]);
      setInput('');
    }
  };

  const toggleTodo = (id) => {
    setTodos(
      todos.map(todo =>
        todo.id === id ? { ...todo, completed: !todo.completed } : todo
      )
    );
  };

  const deleteTodo = (id) => {
    setTodos(todos.filter(todo => todo.id !== id));
  };

  return (
    <div className="todo-app">
      <h1>Todo List</h1>
      <div className="add-todo">
        <input
          value={input}
          onChange={(e) => setInput(e.target.value)}
          onKeyPress={(e) => e.key === 'Enter' && addTodo()}
          placeholder="Add a new task"
        />
        <button onClick={addTodo}>Add</button>
      </div>
      <ul className="todo-list">
        {todos.map(todo => (
          <li key={todo.id} className={todo.completed ? 'completed' : ''}>
            <span onClick={() => toggleTodo(todo.id)}>{todo.text}</span>
            <button onClick={() => deleteTodo(todo.id)}>Delete</button>
          </li>
        ))}
      </ul>
    </div>
  );
}

export default TodoApp;
```

To use this component, you would import it in your `App.js` file. You might also want to add some CSS to style the todo list. Let me know if you'd like me to provide that as well!"#;

const RENEWABLES_ANSWER: &str = "Based on recent research, here are some of the latest developments in renewable energy:

1. **Perovskite Solar Cells**: Efficiency improvements reaching over 25%, approaching traditional silicon cells while being cheaper to produce.

2. **Green Hydrogen**: Increased investment in electrolysis powered by renewable sources to produce carbon-free hydrogen fuel.

3. **Floating Offshore Wind**: New installations of floating wind turbines allowing wind farms in deeper waters with stronger winds.

4. **Long-Duration Energy Storage**: Beyond lithium-ion batteries, new technologies like flow batteries, compressed air, and thermal storage are advancing to store renewable energy for days or weeks.

5. **Agrivoltaics**: Combining solar panels with agricultural land use, improving land efficiency while maintaining crop production.

6. **Solid-State Batteries**: Progress toward commercially viable solid-state batteries that could revolutionize both renewable energy storage and electric vehicles.

7. **AI Grid Management**: Artificial intelligence systems optimizing electricity distribution from variable renewable sources.

Would you like me to expand on any of these specific technologies?";

/// A seeded thread: title, model, plugins, age, question, answer, answer delay
struct SampleThread {
    title: &'static str,
    model: &'static str,
    plugins: &'static [&'static str],
    hours_ago: i64,
    question: &'static str,
    answer: &'static str,
    answer_after_secs: i64,
}

const THREADS: [SampleThread; 3] = [
    SampleThread {
        title: "Learning about AI",
        model: "GPT-3.5",
        plugins: &[],
        hours_ago: 48,
        question: "What are the different types of artificial intelligence?",
        answer: AI_TYPES_ANSWER,
        answer_after_secs: 15,
    },
    SampleThread {
        title: "Coding a React App",
        model: "GPT-4",
        plugins: &["Code Interpreter"],
        hours_ago: 24,
        question: "How do I create a todo list app in React?",
        answer: TODO_APP_ANSWER,
        answer_after_secs: 20,
    },
    SampleThread {
        title: "Research Project",
        model: "Claude 2",
        plugins: &["Web Search", "Image Generation"],
        hours_ago: 2,
        question: "What are the latest developments in renewable energy?",
        answer: RENEWABLES_ANSWER,
        answer_after_secs: 25,
    },
];

/// Clear the store and load the sample data set
pub async fn seed(store: &dyn Store) -> Result<SeedSummary> {
    store.clear().await?;
    tracing::info!("cleared existing data");

    let models = sample_models();
    for model in &models {
        store.insert_model(model).await?;
    }
    let plugins = sample_plugins();
    for plugin in &plugins {
        store.insert_plugin(plugin).await?;
    }

    let started = now();
    let mut conversations = 0;
    let mut messages = 0;

    for thread in &THREADS {
        // Sample threads only reference sample records
        let Some(model) = models.iter().find(|m| m.name == thread.model) else {
            continue;
        };
        let plugin_ids = thread
            .plugins
            .iter()
            .filter_map(|name| plugins.iter().find(|p| p.name == *name))
            .map(|p| p.id)
            .collect();

        let created_at = started - Duration::hours(thread.hours_ago);
        let conversation = Conversation::new(Some(thread.title.to_string()), model.id, plugin_ids)
            .with_created_at(created_at);
        store.insert_conversation(&conversation).await?;
        conversations += 1;

        let question = Message::new(conversation.id, thread.question, ROLE_USER)
            .with_timestamp(created_at + Duration::seconds(1));
        let answer = Message::new(conversation.id, thread.answer, ROLE_ASSISTANT)
            .with_timestamp(created_at + Duration::seconds(thread.answer_after_secs))
            .with_metadata(MessageMetadata {
                model: model.name.clone(),
                plugins: thread.plugins.iter().map(|p| p.to_string()).collect(),
            });
        store.insert_message(&question).await?;
        store.insert_message(&answer).await?;
        messages += 2;
    }

    let summary = SeedSummary {
        models: models.len(),
        plugins: plugins.len(),
        conversations,
        messages,
    };
    tracing::info!(
        models = summary.models,
        plugins = summary.plugins,
        conversations = summary.conversations,
        messages = summary.messages,
        "database seeded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_seed_counts() {
        let store = MemoryStore::new();
        let summary = seed(&store).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                models: 4,
                plugins: 4,
                conversations: 3,
                messages: 6,
            }
        );
        assert_eq!(store.list_models().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_data() {
        let store = MemoryStore::new();
        seed(&store).await.unwrap();
        seed(&store).await.unwrap();
        assert_eq!(store.list_plugins().await.unwrap().len(), 4);
        assert_eq!(store.list_conversations().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_ordering_and_references() {
        let store = MemoryStore::new();
        seed(&store).await.unwrap();

        let conversations = store.list_conversations().await.unwrap();
        let titles: Vec<&str> = conversations.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Research Project", "Coding a React App", "Learning about AI"]
        );

        let research = &conversations[0];
        assert_eq!(research.plugin_ids.len(), 2);
        let messages = store.list_messages(research.id).await.unwrap();
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(
            messages[1].metadata.as_ref().unwrap().plugins,
            vec!["Web Search".to_string(), "Image Generation".to_string()]
        );

        let llama = store
            .list_models()
            .await
            .unwrap()
            .into_iter()
            .find(|m| m.name == "Llama 2")
            .unwrap();
        assert!(!llama.is_active());
    }
}
