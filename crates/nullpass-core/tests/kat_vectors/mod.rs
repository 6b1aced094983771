mod generate;
mod pbkdf2;
