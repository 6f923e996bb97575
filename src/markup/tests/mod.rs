mod tests_panel;
