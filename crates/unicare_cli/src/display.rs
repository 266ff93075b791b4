//! Replies carry the web page's light HTML; flatten it for a terminal.

pub fn plain_text(reply: &str) -> String {
    let reply = reply.replace("<br>", "\n").replace("&bull;", "•");
    let mut out = String::with_capacity(reply.len());
    let mut in_tag = false;
    for c in reply.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
