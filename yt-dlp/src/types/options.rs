/// Value passed to `-f`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Default,
    Custom(String)
}

impl OutputFormat {
    pub fn as_arg(&self) -> Option<String> {
        match self {
            OutputFormat::Default => None,
            OutputFormat::Custom(s) => Some(s.clone())
        }
    }
}

/// Container passed to `--merge-output-format`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Container {
    #[default]
    Default,
    Mp4
}

impl Container {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Container::Default => None,
            Container::Mp4 => Some("mp4")
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub format: OutputFormat,
    pub container: Container,
    pub output_template: Option<String>,
    pub quiet: bool,
    pub no_warnings: bool,
    /// Keep going past per-item errors (`--ignore-errors`).
    pub ignore_errors: bool
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn no_warnings(mut self, no_warnings: bool) -> Self {
        self.no_warnings = no_warnings;
        self
    }

    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }
}
