mod client;

pub use client::{
    AssistantClient, ContentBlock, ListResponse, Role, Run, RunStatus, RunStep, TextValue, Thread,
    ThreadMessage,
};
