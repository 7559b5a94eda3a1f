//! Lightweight markup for item descriptions.
//!
//! Descriptions are Markdown. They are parsed with pulldown-cmark into lines
//! of styled spans that a front end can draw directly, or flattened to plain
//! text for the CLI.

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};

/// Inline styling of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub heading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// One rendered line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<StyledLine>,
    current: StyledLine,
    strong: usize,
    emphasis: usize,
    heading: bool,
    code_block: bool,
    list_depth: usize,
}

impl LineBuilder {
    fn style(&self) -> SpanStyle {
        SpanStyle {
            bold: self.strong > 0 || self.heading,
            italic: self.emphasis > 0,
            code: self.code_block,
            heading: self.heading,
        }
    }

    fn push(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        // Merge with the previous span when the style is unchanged
        if let Some(last) = self.current.spans.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.current.spans.push(StyledSpan {
            text: text.to_string(),
            style,
        });
    }

    fn flush(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    fn text(&mut self, text: &str) {
        if self.code_block {
            let style = self.style();
            let mut pieces = text.split('\n').peekable();
            while let Some(piece) = pieces.next() {
                self.push(piece, style);
                if pieces.peek().is_some() {
                    self.flush();
                }
            }
        } else {
            let style = self.style();
            self.push(text, style);
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                self.flush();
                self.heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush();
                self.heading = false;
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::List(_)) => {
                self.flush();
                self.list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                self.push(&format!("{}• ", indent), SpanStyle::default());
            }
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush();
                self.code_block = false;
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) | Event::HardBreak => {
                self.flush()
            }
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let style = SpanStyle {
                    code: true,
                    ..self.style()
                };
                self.push(&code, style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.push(" ", style);
            }
            _ => {}
        }
    }
}

/// Render Markdown into styled lines.
pub fn render(source: &str) -> Vec<StyledLine> {
    let mut builder = LineBuilder::default();
    for event in MdParser::new(source) {
        builder.handle(event);
    }
    builder.flush();
    builder.lines
}
