use funcplot_core::interpreter::Interpreter;
use funcplot_svg::{RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

/// Loop sample cap for the browser, where a runaway loop freezes the page.
const MAX_SAMPLES: usize = 200_000;

#[wasm_bindgen]
pub struct CompileOutput {
    svg: String,
    diagnostics: String,
    has_error: bool,
}

#[wasm_bindgen]
impl CompileOutput {
    #[wasm_bindgen(getter)]
    pub fn svg(&self) -> String {
        self.svg.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn diagnostics(&self) -> String {
        self.diagnostics.clone()
    }

    #[wasm_bindgen(getter, js_name = hasError)]
    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

#[wasm_bindgen]
pub fn render_program(source: &str) -> CompileOutput {
    compile_program(source)
}

fn compile_program(source: &str) -> CompileOutput {
    let mut interpreter = Interpreter::new();
    interpreter.set_sample_limit(Some(MAX_SAMPLES));

    let report = interpreter.load_program(source);
    let svg = if interpreter.picture.is_empty() {
        String::new()
    } else {
        render_with_options(&interpreter.picture, &RenderOptions::default()).to_string()
    };

    CompileOutput {
        svg,
        diagnostics: report.diagnostics.join("\n"),
        has_error: !report.success,
    }
}
