use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// `GET /`: the single-page board that talks to `/todos`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::INDEX_HTML;

    fn add_todo_body() -> &'static str {
        let start = INDEX_HTML
            .find("async function addTodo()")
            .expect("page defines addTodo");
        let rest = &INDEX_HTML[start..];
        let end = rest.find("\n      }\n").expect("addTodo has a closing brace");
        &rest[..end]
    }

    #[test]
    fn add_is_a_noop_for_blank_input() {
        let body = add_todo_body();
        let guard = body
            .find("if (!state.title.trim()) return;")
            .expect("blank input guard");
        let post = body.find("method: \"POST\"").expect("create request");
        assert!(guard < post);
    }

    #[test]
    fn add_clears_input_before_refetching() {
        let body = add_todo_body();
        let post = body.find("method: \"POST\"").expect("create request");
        let clear = body.find("state.title = \"\";").expect("input cleared");
        let refetch = body.find("fetchTodos();").expect("list re-fetched");
        assert!(post < clear);
        assert!(clear < refetch);
        assert!(!body.contains("state.todos"), "no optimistic update");
    }

    #[test]
    fn list_is_fetched_on_load() {
        let script_end = INDEX_HTML.rfind("</script>").expect("script block");
        let tail = &INDEX_HTML[..script_end];
        assert!(tail.trim_end().ends_with("fetchTodos();"));
    }
}
