use log::debug;
use regex::Regex;

pub const COMPETITORS_VARIABLE: &str = "jsCompetitors";

pub struct EmbeddedObject {}

impl EmbeddedObject {
    /// # find object literal
    /// find the object literal assigned to `variable` in the page. the
    /// assignment may or may not be a declaration (`var`, `let`, `const`).
    ///
    /// the literal is cut out by counting braces from the opening brace to its
    /// matching closing brace, braces inside string literals are not counted.
    ///
    /// ## Arguments
    /// * `page` - the raw page text
    /// * `variable` - the name of the javascript variable
    ///
    /// ## Returns
    /// * `Option<&str>` - the literal including its outer braces, none when the
    ///   variable is never assigned an object or the literal is never closed
    pub fn find<'a>(page: &'a str, variable: &str) -> Option<&'a str> {
        let pattern = format!(r"(?:^|[^A-Za-z0-9_$]){}\s*=\s*\{{", regex::escape(variable));
        let assignment = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(error) => {
                debug!(target:"parsers/embedded_object:find", "invalid variable name {}. (error: {})", variable, error);
                return None;
            }
        };

        for found in assignment.find_iter(page) {
            let open = found.end() - 1;
            match EmbeddedObject::matching_brace(&page[open..]) {
                Some(len) => return Some(&page[open..open + len]),
                None => {
                    debug!(target:"parsers/embedded_object:find", "object literal of {} is never closed", variable);
                }
            }
        }

        None
    }

    /// length of the balanced `{...}` block at the start of `text`
    fn matching_brace(text: &str) -> Option<usize> {
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        let mut escaped = false;

        for (index, byte) in text.bytes().enumerate() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == q {
                    quote = None;
                }
                continue;
            }

            match byte {
                b'"' | b'\'' | b'`' => quote = Some(byte),
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(index + 1);
                    }
                }
                _ => {}
            }
        }

        None
    }
}
