//! Template renderer module.
//!
//! Renders parsed template nodes with the given context.

use std::collections::HashMap;

use super::parser::Node;
use super::{escape_html, Result, TemplateContext, TemplateError, Value};

/// Maximum partial nesting depth.
const MAX_PARTIAL_DEPTH: usize = 8;

/// Template renderer.
pub struct Renderer<'a> {
    context: &'a TemplateContext,
    partials: Option<&'a HashMap<String, Vec<Node>>>,
    depth: usize,
}

impl<'a> Renderer<'a> {
    /// Create a new renderer with the given context and no partials.
    pub fn new(context: &'a TemplateContext) -> Self {
        Self {
            context,
            partials: None,
            depth: 0,
        }
    }

    /// Create a renderer that resolves `{{> name}}` against `partials`.
    pub fn with_partials(
        context: &'a TemplateContext,
        partials: &'a HashMap<String, Vec<Node>>,
    ) -> Self {
        Self {
            context,
            partials: Some(partials),
            depth: 0,
        }
    }

    fn child<'b>(&'b self, context: &'b TemplateContext) -> Renderer<'b> {
        Renderer {
            context,
            partials: self.partials,
            depth: self.depth,
        }
    }

    /// Render a list of nodes to a string.
    pub fn render(&self, nodes: &[Node]) -> Result<String> {
        let mut output = String::new();

        for node in nodes {
            output.push_str(&self.render_node(node)?);
        }

        Ok(output)
    }

    fn render_node(&self, node: &Node) -> Result<String> {
        match node {
            Node::Text(text) => Ok(text.clone()),
            Node::Variable(name) => Ok(escape_html(&self.lookup(name))),
            Node::RawVariable(name) => Ok(self.lookup(name)),
            Node::Partial(name) => self.render_partial(name),
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => self.render_if(condition, then_branch, else_branch),
            Node::Each {
                variable,
                item_name,
                body,
            } => self.render_each(variable, item_name.as_deref(), body),
            Node::Unless { condition, body } => self.render_unless(condition, body),
            Node::With { variable, body } => self.render_with(variable, body),
        }
    }

    /// Missing variables render as an empty string.
    fn lookup(&self, name: &str) -> String {
        self.context
            .get(name)
            .map(|v| v.to_display_string())
            .unwrap_or_default()
    }

    fn is_truthy(&self, condition: &str) -> bool {
        self.context
            .get(condition)
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }

    fn render_partial(&self, name: &str) -> Result<String> {
        let nodes = self
            .partials
            .and_then(|p| p.get(name))
            .ok_or_else(|| TemplateError::NotFound(format!("partial '{name}'")))?;

        if self.depth >= MAX_PARTIAL_DEPTH {
            return Err(TemplateError::Render(format!(
                "partial '{name}' nested too deeply"
            )));
        }

        let nested = Renderer {
            context: self.context,
            partials: self.partials,
            depth: self.depth + 1,
        };
        nested.render(nodes)
    }

    fn render_if(
        &self,
        condition: &str,
        then_branch: &[Node],
        else_branch: &[Node],
    ) -> Result<String> {
        if self.is_truthy(condition) {
            self.render(then_branch)
        } else {
            self.render(else_branch)
        }
    }

    fn render_each(
        &self,
        variable: &str,
        item_name: Option<&str>,
        body: &[Node],
    ) -> Result<String> {
        let list = match self.context.get(variable) {
            Some(Value::List(items)) => items,
            Some(Value::Null) | None => return Ok(String::new()),
            Some(_) => {
                return Err(TemplateError::Render(format!("'{variable}' is not a list")));
            }
        };

        let mut output = String::new();
        let item_var_name = item_name.unwrap_or("this");

        for (index, item) in list.iter().enumerate() {
            let mut child_context = self.context.child();
            child_context.set(item_var_name, item.clone());
            child_context.set("@index", Value::Number(index as i64));
            child_context.set("@first", Value::Bool(index == 0));
            child_context.set("@last", Value::Bool(index == list.len() - 1));

            // Object fields are also reachable without a prefix
            if let Value::Object(obj) = item {
                for (key, value) in obj {
                    child_context.set(key.clone(), value.clone());
                }
            }

            output.push_str(&self.child(&child_context).render(body)?);
        }

        Ok(output)
    }

    fn render_unless(&self, condition: &str, body: &[Node]) -> Result<String> {
        if self.is_truthy(condition) {
            Ok(String::new())
        } else {
            self.render(body)
        }
    }

    fn render_with(&self, variable: &str, body: &[Node]) -> Result<String> {
        let value = match self.context.get(variable) {
            Some(v) => v.clone(),
            None => return Ok(String::new()),
        };

        let mut child_context = self.context.child();
        if let Value::Object(obj) = &value {
            for (key, val) in obj {
                child_context.set(key.clone(), val.clone());
            }
        }
        child_context.set("this", value);

        self.child(&child_context).render(body)
    }
}
