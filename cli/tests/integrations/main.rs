mod eval;
mod repl;
mod run;
