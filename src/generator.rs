//! Placeholder assistant replies
//!
//! Stands in for a real inference call. The output depends only on its
//! inputs: no randomness, no I/O.

/// Build the templated reply for `text` as if produced by `model_name`
/// with `plugins` attached.
pub fn generate_mock_response<S: AsRef<str>>(text: &str, model_name: &str, plugins: &[S]) -> String {
    let plugin_info = if plugins.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = plugins.iter().map(|p| p.as_ref()).collect();
        format!("I'm using these plugins: {}.\n", names.join(", "))
    };

    format!(
        "Hello! I'm a simulated response from {}.\n{}You said: \"{}\"\n\n\
         Here's my mock response based on your input. In a real implementation, \
         this would be an actual AI response from the model's API endpoint.",
        model_name, plugin_info, text
    )
}
