mod tests_symbol;
