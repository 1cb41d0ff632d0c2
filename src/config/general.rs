//! The general configuration settings for dirpilot.
//!
//! Names the external programs the process bridge hands the terminal to and the
//! file suffix that marks a runnable script.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    interpreter: String,
    script_suffix: String,
    pager: String,
    pause_after_run: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            interpreter: "python3".into(),
            script_suffix: ".py".into(),
            pager: "less".into(),
            pause_after_run: true,
        }
    }
}

impl General {
    /// Interpreter binary looked up on PATH for `Open` on a script.
    #[inline]
    pub fn interpreter(&self) -> &str {
        self.interpreter.trim()
    }

    /// Regular files ending with this suffix are run instead of viewed.
    #[inline]
    pub fn script_suffix(&self) -> &str {
        &self.script_suffix
    }

    /// Pager binary looked up on PATH for `Open` on any other file.
    #[inline]
    pub fn pager(&self) -> &str {
        self.pager.trim()
    }

    /// Wait for Enter after a script exits so its output can be read.
    #[inline]
    pub fn pause_after_run(&self) -> bool {
        self.pause_after_run
    }
}
