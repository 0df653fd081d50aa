//! Cache key composition for the read endpoints.
//!
//! Keys are colon-separated and built from the same query parameters the
//! route handlers paginate on, so write-side invalidation can guess them.

pub fn user(id: &str) -> String {
    format!("user:{id}")
}

pub fn user_posts(user_id: &str, page: u32) -> String {
    format!("user:{user_id}:posts:{page}")
}

pub fn user_stats(user_id: &str) -> String {
    format!("user:{user_id}:stats")
}

pub fn post(id: &str) -> String {
    format!("post:{id}")
}

pub fn post_list(page: u32, limit: u32) -> String {
    format!("posts:{page}:{limit}")
}

pub fn search(query: &str, kind: &str) -> String {
    format!("search:{query}:{kind}")
}

pub fn trending_tags() -> String {
    "trending:tags".to_string()
}
