//! Starter `main.py` templates, one per framework

use super::Framework;

/// Render the starter source file for a framework
///
/// Vanilla, Typer and NiceGUI greet with the project name. The FastAPI and Flask
/// templates are fixed and ignore it.
pub fn generate_starter(name: &str, framework: Framework) -> String {
    match framework {
        Framework::Vanilla => format!(
            r#"def main() -> None:
    print("Hello from {name}!")

if __name__ == "__main__":
    main()
"#
        ),
        Framework::FastApi => r#"from fastapi import FastAPI

app = FastAPI()

@app.get("/")
def main():
    return {"Hello": "World", "Framework": "FastAPI"}
"#
        .to_string(),
        Framework::Flask => r#"from flask import Flask

app = Flask(__name__)

@app.route("/")
def main():
    return {"Hello": "World", "Framework": "Flask"}
"#
        .to_string(),
        Framework::Streamlit => format!(
            r#"import streamlit as st

st.title("{name}")
st.write("Welcome to your new Streamlit app!")
"#
        ),
        Framework::Typer => format!(
            r#"import typer

app = typer.Typer()

@app.command()
def main(name: str = "{name}") -> None:
    print(f"Welcome to your new Typer app, {{name}}!")

if __name__ == "__main__":
    app()
"#
        ),
        Framework::NiceGui => format!(
            r#"from nicegui import ui

def main():
    ui.label('Hello from {name}!')
    ui.button('Click me!', on_click=lambda: ui.notify('You clicked me!'))
    ui.run(reload=True)

if __name__ in {{"__main__", "__mp_main__"}}:
    main()
"#
        ),
    }
}
